//! Display activity policy driven by the media snapshot.

mod activity;

pub use activity::{DimTiming, DisplayActivity, DisplayMode};

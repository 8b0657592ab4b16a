/// Shared reactive building blocks
pub mod common;
/// Display dimming policy
pub mod display;
/// Media state observer
pub mod media;
/// MPRIS media session source
pub mod mpris;

pub use display::{DimTiming, DisplayActivity, DisplayMode};
pub use media::{MediaObserver, MediaSnapshot, TransportCommand};
pub use mpris::MprisSource;

//! MPRIS session source.
//!
//! Exposes media players on the D-Bus session bus as platform media
//! sessions for the observer.

mod metadata;
/// D-Bus proxy trait definitions
pub mod proxy;
mod session;
mod source;

pub use proxy::*;
pub use session::MprisSession;
pub use source::MprisSource;

//! Media state observer.
//!
//! Follows whichever media session the platform reports as active and
//! mirrors its metadata and playback state into a single
//! [`MediaSnapshot`]. Transport commands travel the other way through the
//! observer's weak handle on the bound session.

/// Media error types
pub mod error;
mod monitoring;
/// The observer and its state machine
pub mod observer;
/// Platform seam traits
pub mod session;
/// Snapshot and update types
pub mod snapshot;
/// Identifiers, playback states and commands
pub mod types;

pub use error::*;
pub use observer::MediaObserver;
pub use session::*;
pub use snapshot::*;
pub use types::*;

//! mediamirror - mirrors the active media session into one observable snapshot.
//!
//! The crate follows whichever media player the platform reports as active
//! and keeps a single [`MediaSnapshot`](services::MediaSnapshot) current:
//!
//! - Merge-not-replace updates from metadata and playback callbacks
//! - Transport commands routed to the bound session
//! - An MPRIS session source for the Linux session bus
//! - Display dimming driven by playback activity
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mediamirror::{
//!     config::Config,
//!     services::{MediaObserver, MprisSource},
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_default()?;
//! let observer = MediaObserver::new(config.media.session_loss);
//!
//! let source = MprisSource::connect(&config.media).await?;
//! observer.attach(Arc::new(source)).await;
//!
//! println!("Now playing: {}", observer.snapshot().title);
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface for inspecting and controlling media.
pub mod cli;

/// Reactive services for media observation.
pub mod services;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{MirrorError, Result};

/// Configuration inspection commands
pub mod config;
/// Media inspection and control commands
pub mod media;

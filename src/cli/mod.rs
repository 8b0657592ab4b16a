//! Command-line interface for inspecting and controlling media.
//!
//! Provides a hierarchical command system for reading the mirrored media
//! snapshot, sending transport commands, and inspecting configuration.
//! Commands are organized by category and automatically generate help
//! text from metadata.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{ArgType, CliError, Command, CommandArg, CommandMetadata, CommandResult};

use async_trait::async_trait;
use thiserror::Error;

use crate::{MirrorError, services::media::MediaError};

/// Errors that can occur during CLI command execution.
///
/// Covers everything from command discovery failures to errors raised by
/// the media services a command talks to.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid number of arguments were provided to a command.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A single argument value could not be understood.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        arg: String,
        /// Why the value was rejected
        reason: String,
    },

    /// An error occurred in the configuration system.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] MirrorError),

    /// A service the command depends on failed.
    #[error("{service} service error: {details}")]
    ServiceError {
        /// Service that failed
        service: String,
        /// Failure details
        details: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<MediaError> for CliError {
    fn from(error: MediaError) -> Self {
        CliError::ServiceError {
            service: "Media".to_string(),
            details: error.to_string(),
        }
    }
}

/// Type alias for command execution results.
///
/// All CLI commands return either the text to print or a CliError
/// describing what went wrong.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
///
/// Used for help generation and argument count validation.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "position", "format").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// The expected type of this argument for help display.
    pub value_type: ArgType,
}

/// Type classification for command arguments.
#[derive(Debug, Clone)]
pub enum ArgType {
    /// A general string value.
    String,

    /// A playback position (seconds, mm:ss, percentage or relative).
    Position,
}

/// Complete metadata for a CLI command.
///
/// The single source of truth for a command's identity, arguments and
/// usage examples.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "info", "seek").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "media", "config").
    pub category: String,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against the
    /// command's metadata; the command validates the values.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for invalid argument values, configuration
    /// errors, service failures and I/O failures.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}

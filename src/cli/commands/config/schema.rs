use async_trait::async_trait;

use crate::{
    cli::{CliError, Command, CommandResult, types::CommandMetadata},
    config::Config,
};

/// Prints the JSON schema of the configuration file.
///
/// Editors with TOML schema support can use it for completion and
/// validation.
pub struct SchemaCommand;

impl SchemaCommand {
    /// Creates a new SchemaCommand.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SchemaCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for SchemaCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        serde_json::to_string_pretty(&Config::schema()).map_err(|e| CliError::ServiceError {
            service: "Config".to_string(),
            details: format!("Failed to serialize schema: {e}"),
        })
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "schema".to_string(),
            description: "Print the JSON schema of the configuration file".to_string(),
            category: "config".to_string(),
            args: vec![],
            examples: vec!["mediamirror config schema > mediamirror.schema.json".to_string()],
        }
    }
}

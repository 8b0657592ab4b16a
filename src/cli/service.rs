use std::sync::Arc;

use crate::config::Config;

use super::{
    CliError, CommandRegistry,
    formatting::{
        format_category, format_command, format_description, format_header, format_subheader,
        format_usage,
    },
};

/// High-level service for managing and executing CLI commands.
///
/// Provides a unified interface for command registration, discovery, and execution.
/// Commands are organized by category and can be listed or executed by name.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    ///
    /// The loaded configuration is shared across commands that need it.
    pub fn new(config: Config) -> Self {
        let mut registry = CommandRegistry::new(Arc::new(config));
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist in the category.
    /// Returns any error the command raises while executing.
    pub async fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        self.registry.execute(category, command_name, args).await
    }

    /// Lists all available commands organized by category.
    ///
    /// # Returns
    /// Vector of (category_name, command_names) tuples
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    /// Renders the top-level help listing every category and command.
    pub fn help(&self) -> String {
        let mut output = String::new();
        output.push_str(&format_header("mediamirror"));
        output.push('\n');
        output.push_str(&format_description(
            "Mirror the active media session and control playback",
        ));
        output.push_str("\n\n");
        output.push_str(&format_subheader("Usage:"));
        output.push_str("\n  mediamirror <category> <command> [args...]\n");
        output.push_str("  mediamirror help <category> <command>\n\n");

        for (category, commands) in self.list_all() {
            output.push_str(&format_category(&category));
            output.push('\n');
            for command in commands {
                let description = self
                    .registry
                    .metadata(&category, &command)
                    .map(|metadata| metadata.description)
                    .unwrap_or_default();
                output.push_str(&format!(
                    "  {:<24} {}\n",
                    format_command(&command),
                    format_description(&description)
                ));
            }
            output.push('\n');
        }

        output
    }

    /// Renders detailed help for one command.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist.
    pub fn command_help(&self, category: &str, command_name: &str) -> Result<String, CliError> {
        let metadata = self.registry.metadata(category, command_name)?;

        let mut output = String::new();
        output.push_str(&format_header(&format!(
            "{} {}",
            metadata.category, metadata.name
        )));
        output.push('\n');
        output.push_str(&format_description(&metadata.description));
        output.push_str("\n\n");

        if !metadata.args.is_empty() {
            output.push_str(&format_subheader("Arguments:"));
            output.push('\n');
            for arg in &metadata.args {
                let name = if arg.required {
                    format!("<{}>", arg.name)
                } else {
                    format!("[{}]", arg.name)
                };
                output.push_str(&format!(
                    "  {:<12} {:?}  {}\n",
                    name, arg.value_type, arg.description
                ));
            }
            output.push('\n');
        }

        if !metadata.examples.is_empty() {
            output.push_str(&format_subheader("Examples:"));
            output.push('\n');
            for example in &metadata.examples {
                output.push_str(&format!("  {}\n", format_usage(example)));
            }
        }

        Ok(output)
    }
}

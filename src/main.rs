//! mediamirror - entry point for the media CLI.

use std::{env, error::Error, process};

use mediamirror::{
    cli::{CliService, formatting::format_error},
    config::Config,
    tracing_config,
};
use tracing::{Level, info, span};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = match Config::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    };

    let is_long_running = matches!(
        (args.first().map(String::as_str), args.get(1).map(String::as_str)),
        (Some("media"), Some("watch"))
    );

    let _guard = if is_long_running {
        let guard = tracing_config::init_with_file(config.general.log_level)?;
        let _span = span!(Level::INFO, "mediamirror_watch").entered();
        info!("Starting media watch");
        Some(guard)
    } else {
        tracing_config::init(config.general.log_level)?;
        None
    };

    run_cli_command(config, &args).await;

    Ok(())
}

/// Executes CLI commands through the CliService.
///
/// Routes `<category> <command> [args...]` to the matching command handler
/// and `help [category command]` to the help renderer. Exits with status 1
/// when the command fails.
async fn run_cli_command(config: Config, args: &[String]) {
    let cli_service = CliService::new(config);

    let category = args.first().map(|s| s.as_str()).unwrap_or("help");
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("");
    let command_args = args.get(2..).unwrap_or(&[]);

    let result = match (category, command) {
        ("help" | "--help" | "-h", "") => Ok(cli_service.help()),
        ("help", category) => match command_args.first() {
            Some(command) => cli_service.command_help(category, command),
            None => Ok(cli_service.help()),
        },
        (category, command) => {
            cli_service
                .execute_command(category, command, command_args)
                .await
        }
    };

    match result {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}

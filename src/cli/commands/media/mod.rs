/// Media player inspection and control commands
mod info;
mod seek;
mod transport;
mod utils;
mod watch;

use std::sync::Arc;

pub use info::InfoCommand;
pub use seek::SeekCommand;
pub use transport::TransportCliCommand;
pub use watch::WatchCommand;

use crate::{cli::CommandRegistry, config::Config};

/// Registers all media-related commands with the command registry
///
/// Registers commands in the "media" category for inspecting and
/// controlling the active media player.
pub fn register_commands(registry: &mut CommandRegistry, config: Arc<Config>) {
    const CATEGORY_NAME: &str = "media";

    registry.register_command(CATEGORY_NAME, Box::new(InfoCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(WatchCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(SeekCommand::new(config.clone())));
    registry.register_command(
        CATEGORY_NAME,
        Box::new(TransportCliCommand::play(config.clone())),
    );
    registry.register_command(
        CATEGORY_NAME,
        Box::new(TransportCliCommand::pause(config.clone())),
    );
    registry.register_command(
        CATEGORY_NAME,
        Box::new(TransportCliCommand::play_pause(config.clone())),
    );
    registry.register_command(
        CATEGORY_NAME,
        Box::new(TransportCliCommand::next(config.clone())),
    );
    registry.register_command(CATEGORY_NAME, Box::new(TransportCliCommand::previous(config)));
}

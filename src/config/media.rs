use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::media::SessionLossPolicy;

/// Media service configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(default)]
pub struct MediaConfig {
    /// List of player bus name patterns to ignore during discovery
    pub ignored_players: Vec<String>,

    /// What to do when the followed session disappears.
    pub session_loss: SessionLossPolicy,
}

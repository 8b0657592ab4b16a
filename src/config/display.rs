use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::display::DimTiming;

/// Display dimming configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Seconds without activity before dimming while media is playing.
    pub dim_after_playing_secs: u64,

    /// Seconds without activity before dimming while media is paused.
    pub dim_after_paused_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let timing = DimTiming::default();
        Self {
            dim_after_playing_secs: timing.playing.as_secs(),
            dim_after_paused_secs: timing.paused.as_secs(),
        }
    }
}

impl DisplayConfig {
    /// Dimming delays as durations.
    pub fn timing(&self) -> DimTiming {
        DimTiming {
            playing: Duration::from_secs(self.dim_after_playing_secs),
            paused: Duration::from_secs(self.dim_after_paused_secs),
        }
    }
}

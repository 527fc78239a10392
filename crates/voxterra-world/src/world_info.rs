//! World metadata document.

use serde::{Deserialize, Serialize};
use voxterra_common::WORLD_FORMAT_VERSION;

/// World-level metadata, persisted as `world.json` once per save and loaded
/// once at world open.
///
/// Every field defaults when absent so documents written by other engine
/// versions stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldInfo {
    /// World display name.
    pub name: String,
    /// Id of the generator the world was created with.
    pub generator: String,
    /// World generation seed.
    pub seed: u64,
    /// Time of day in days, fractional part is the current day's progress.
    pub day_time: f64,
    /// Total elapsed world time in seconds.
    pub total_time: f64,
    /// World spawn point, if one has been set.
    pub spawn_point: Option<[f64; 3]>,
    /// Format version of this document.
    pub format_version: u32,
}

impl Default for WorldInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            generator: String::from("core:default"),
            seed: 0,
            day_time: 0.0,
            total_time: 0.0,
            spawn_point: None,
            format_version: WORLD_FORMAT_VERSION,
        }
    }
}

impl WorldInfo {
    /// Creates metadata for a new world.
    #[must_use]
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            seed,
            ..Default::default()
        }
    }

    /// Sets the generator id.
    #[must_use]
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Sets the spawn point.
    #[must_use]
    pub fn with_spawn_point(mut self, spawn: [f64; 3]) -> Self {
        self.spawn_point = Some(spawn);
        self
    }
}

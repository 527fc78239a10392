//! Debug settings consumed by the persistence layer.

use serde::{Deserialize, Serialize};

/// Debug flags loaded from the engine's external configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Exercise world generation without persisting indices or chunk data.
    pub generator_test_mode: bool,
    /// Forward computed light data to the region store on save.
    pub write_lights: bool,
}

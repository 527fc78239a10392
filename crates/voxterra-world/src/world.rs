//! Live world session aggregate.

use crate::pack::ContentPack;
use crate::world_info::WorldInfo;

/// The live world state handed to [`crate::files::WorldFiles::write`]:
/// mutable metadata plus the ordered set of packs the save was created with.
#[derive(Debug, Clone)]
pub struct World {
    info: WorldInfo,
    packs: Vec<ContentPack>,
}

impl World {
    /// Creates a world session from metadata and its installed packs.
    #[must_use]
    pub fn new(info: WorldInfo, packs: Vec<ContentPack>) -> Self {
        Self { info, packs }
    }

    /// Current world metadata.
    #[must_use]
    pub fn info(&self) -> &WorldInfo {
        &self.info
    }

    /// Mutable world metadata, updated by the simulation between saves.
    pub fn info_mut(&mut self) -> &mut WorldInfo {
        &mut self.info
    }

    /// Packs this world was created with, in load order.
    #[must_use]
    pub fn packs(&self) -> &[ContentPack] {
        &self.packs
    }
}

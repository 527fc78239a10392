//! # Voxterra World
//!
//! World persistence for Project Voxterra.
//!
//! This crate owns the durable on-disk representation of a world and keeps it
//! consistent as the set of installed content packs changes:
//! - Save directory layout and orchestration (`WorldFiles`)
//! - Content-index registry and its versioned indices document
//! - Per-unit resource saved-state round trip
//! - Pack-removal migration of the indices document
//! - The region store collaborator seam

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod document;
pub mod error;
pub mod files;
pub mod pack;
pub mod region_store;
pub mod registry;
pub mod settings;
pub mod world;
pub mod world_info;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::document::*;
    pub use crate::error::*;
    pub use crate::files::*;
    pub use crate::pack::*;
    pub use crate::region_store::*;
    pub use crate::registry::*;
    pub use crate::settings::*;
    pub use crate::world::*;
    pub use crate::world_info::*;
}

pub use prelude::*;

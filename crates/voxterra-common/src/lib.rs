//! # Voxterra Common
//!
//! Common types, utilities, and shared abstractions for Project Voxterra.
//!
//! This crate provides foundational types used across all Voxterra subsystems:
//! - Runtime ID types for indexed content units (`BlockId`, `ItemId`, ...)
//! - On-disk format version constants
//! - Well-known fallback unit names and pack-id validation
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod names;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::names::*;
    pub use crate::version::*;
}

pub use prelude::*;

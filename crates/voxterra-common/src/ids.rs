//! Runtime ID types for indexed content units.
//!
//! A runtime id is the dense integer assigned to a content unit for one world
//! save. Position `i` in a kind's on-disk name list is exactly id `i`; the ids
//! are only meaningful together with that save's indices document.

use serde::{Deserialize, Serialize};

/// Runtime identifier of a block type within one save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(u32);

impl BlockId {
    /// The reserved air block. Every registry places it at index 0.
    pub const AIR: Self = Self(0);

    /// Creates a block ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Runtime identifier of an item type within one save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// The reserved empty item. Every registry places it at index 0.
    pub const EMPTY: Self = Self(0);

    /// Creates an item ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Runtime identifier of an entity type within one save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityTypeId(u32);

impl EntityTypeId {
    /// Creates an entity type ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

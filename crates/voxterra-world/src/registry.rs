//! Content-index registry.
//!
//! This module provides:
//! - Definitions for the three indexed content-unit kinds (blocks, items,
//!   entities)
//! - `UnitIndex`, the append-only name table whose position is the runtime id
//! - `ContentIndices`, the per-save registry, and its versioned indices
//!   document (serialization and rebuild)
//! - Resource indices holding per-unit saved state

use crate::error::{PersistError, PersistResult};
use ahash::AHashMap;
use serde_json::{Map, Value};
use voxterra_common::{
    BlockId, EntityTypeId, ItemId, REGION_FORMAT_VERSION, REGION_VERSION_FIELD,
};

// ============================================================================
// Content unit definitions
// ============================================================================

/// Anything stored in a [`UnitIndex`] exposes its namespaced name.
pub trait Named {
    /// The unit's namespaced name, `"<pack>:<unit>"`.
    fn name(&self) -> &str;
}

/// Definition of a block type.
#[derive(Debug, Clone)]
pub struct BlockDef {
    /// Namespaced name, e.g. `"core:stone"`.
    pub name: String,
    /// Schema of the block's custom per-voxel data layout, if it has one.
    pub data_schema: Option<Value>,
}

impl BlockDef {
    /// Creates a block definition with no custom data layout.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_schema: None,
        }
    }

    /// Attaches a custom data-layout schema.
    #[must_use]
    pub fn with_data_schema(mut self, schema: Value) -> Self {
        self.data_schema = Some(schema);
        self
    }
}

impl Named for BlockDef {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Definition of an item type.
#[derive(Debug, Clone)]
pub struct ItemDef {
    /// Namespaced name, e.g. `"core:pickaxe"`.
    pub name: String,
}

impl ItemDef {
    /// Creates an item definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Named for ItemDef {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Definition of an entity type.
#[derive(Debug, Clone)]
pub struct EntityDef {
    /// Namespaced name, e.g. `"core:drop"`.
    pub name: String,
}

impl EntityDef {
    /// Creates an entity definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Named for EntityDef {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Unit index: position = runtime id
// ============================================================================

/// Append-only table of content units of one kind.
///
/// The position of a definition is its runtime id for this save, and the
/// iteration order is the id order. Simulation code dereferences ids in O(1)
/// through the dense vector; persistence walks the same order so repeated
/// saves of an unchanged registry are bit-for-bit identical.
#[derive(Debug, Clone)]
pub struct UnitIndex<T> {
    defs: Vec<T>,
    by_name: AHashMap<String, usize>,
}

impl<T> Default for UnitIndex<T> {
    fn default() -> Self {
        Self {
            defs: Vec::new(),
            by_name: AHashMap::new(),
        }
    }
}

impl<T: Named> UnitIndex<T> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a definition, assigning it the next runtime id.
    ///
    /// Returns the assigned id. A duplicate name replaces nothing; the first
    /// registration keeps the id and the duplicate is ignored.
    pub fn add(&mut self, def: T) -> usize {
        if let Some(&id) = self.by_name.get(def.name()) {
            return id;
        }
        let id = self.defs.len();
        self.by_name.insert(def.name().to_string(), id);
        self.defs.push(def);
        id
    }

    /// Resolves a name to its runtime id.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Returns the definition with the given runtime id.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&T> {
        self.defs.get(id)
    }

    /// Number of registered units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterates definitions in runtime-id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.defs.iter()
    }
}

// ============================================================================
// Resource indices: per-unit saved state
// ============================================================================

/// Known resource types that may carry saved state in `resources.json`.
///
/// This is a closed enumeration; top-level keys of the resources document
/// that match no tag here are skipped with a warning so files written by a
/// newer engine still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// Scriptable camera profiles.
    Camera,
}

impl ResourceType {
    /// All known resource types.
    pub const ALL: &'static [Self] = &[Self::Camera];

    /// The document key this type is stored under.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Camera => "camera",
        }
    }

    /// Classifies a document key, `None` for unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.tag() == tag)
    }
}

/// Ordered name table for one resource type, with a saved-state slot per id.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    names: Vec<String>,
    by_name: AHashMap<String, usize>,
    saved: Vec<Option<Value>>,
}

impl ResourceIndex {
    /// Creates an empty resource index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource name, returning its id.
    pub fn add(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = self.names.len();
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        self.saved.push(None);
        id
    }

    /// Resolves a resource name to its id.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Stores restored saved state against an id.
    pub fn save_data(&mut self, id: usize, data: Value) {
        if let Some(slot) = self.saved.get_mut(id) {
            *slot = Some(data);
        }
    }

    /// Returns the saved state restored for an id, if any.
    #[must_use]
    pub fn saved_data(&self, id: usize) -> Option<&Value> {
        self.saved.get(id).and_then(Option::as_ref)
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// Per-save registry and the indices document
// ============================================================================

/// The per-save content registry: every indexed unit kind plus resource
/// indices, in runtime-id order.
#[derive(Debug, Clone, Default)]
pub struct ContentIndices {
    /// Block definitions, position = block id.
    pub blocks: UnitIndex<BlockDef>,
    /// Item definitions, position = item id.
    pub items: UnitIndex<ItemDef>,
    /// Entity definitions, position = entity type id.
    pub entities: UnitIndex<EntityDef>,
    cameras: ResourceIndex,
}

impl ContentIndices {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-seeded with the fallback units at id 0.
    #[must_use]
    pub fn with_core_units() -> Self {
        let mut indices = Self::new();
        indices.blocks.add(BlockDef::new(voxterra_common::CORE_AIR));
        indices.items.add(ItemDef::new(voxterra_common::CORE_EMPTY));
        indices
    }

    /// Resolves a block name to its runtime id for this save.
    #[must_use]
    pub fn block_id(&self, name: &str) -> Option<BlockId> {
        self.blocks.index_of(name).map(|id| BlockId::new(id as u32))
    }

    /// Resolves an item name to its runtime id for this save.
    #[must_use]
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.items.index_of(name).map(|id| ItemId::new(id as u32))
    }

    /// Resolves an entity type name to its runtime id for this save.
    #[must_use]
    pub fn entity_type_id(&self, name: &str) -> Option<EntityTypeId> {
        self.entities
            .index_of(name)
            .map(|id| EntityTypeId::new(id as u32))
    }

    /// Returns the resource index for a resource type.
    #[must_use]
    pub fn resource_index(&self, resource: ResourceType) -> &ResourceIndex {
        match resource {
            ResourceType::Camera => &self.cameras,
        }
    }

    /// Returns the mutable resource index for a resource type.
    pub fn resource_index_mut(&mut self, resource: ResourceType) -> &mut ResourceIndex {
        match resource {
            ResourceType::Camera => &mut self.cameras,
        }
    }

    /// Builds the versioned indices document.
    ///
    /// Name lists are written in runtime-id order. Blocks with a custom data
    /// layout contribute an entry to the sparse `blocks-data` map; blocks
    /// without one contribute nothing.
    #[must_use]
    pub fn to_document(&self) -> Value {
        let name_list = |names: Vec<&str>| Value::Array(names.into_iter().map(Value::from).collect());
        let blocks: Vec<&str> = self.blocks.iter().map(|b| b.name.as_str()).collect();
        let items: Vec<&str> = self.items.iter().map(|i| i.name.as_str()).collect();
        let entities: Vec<&str> = self.entities.iter().map(|e| e.name.as_str()).collect();

        let mut schemas = Map::new();
        for block in self.blocks.iter() {
            if let Some(schema) = &block.data_schema {
                schemas.insert(block.name.clone(), schema.clone());
            }
        }

        let mut root = Map::new();
        root.insert(
            REGION_VERSION_FIELD.to_string(),
            Value::from(REGION_FORMAT_VERSION),
        );
        root.insert("blocks".to_string(), name_list(blocks));
        root.insert("items".to_string(), name_list(items));
        root.insert("entities".to_string(), name_list(entities));
        root.insert("blocks-data".to_string(), Value::Object(schemas));
        Value::Object(root)
    }

    /// Rebuilds a registry from an indices document.
    ///
    /// The mirror of [`Self::to_document`]: list position becomes the runtime
    /// id again, and block data schemas are reattached from `blocks-data`.
    pub fn from_document(doc: &Value) -> PersistResult<Self> {
        let mut indices = Self::new();
        let schemas = doc.get("blocks-data").and_then(Value::as_object);

        for name in read_name_list(doc, "blocks")? {
            let mut def = BlockDef::new(name);
            if let Some(schema) = schemas.and_then(|m| m.get(&def.name)) {
                def = def.with_data_schema(schema.clone());
            }
            indices.blocks.add(def);
        }
        for name in read_name_list(doc, "items")? {
            indices.items.add(ItemDef::new(name));
        }
        for name in read_name_list(doc, "entities")? {
            indices.entities.add(EntityDef::new(name));
        }
        Ok(indices)
    }
}

fn read_name_list(doc: &Value, key: &str) -> PersistResult<Vec<String>> {
    let Some(list) = doc.get(key) else {
        return Ok(Vec::new());
    };
    let entries = list
        .as_array()
        .ok_or_else(|| PersistError::MalformedIndices(format!("'{key}' is not a list")))?;
    entries
        .iter()
        .map(|entry| {
            entry.as_str().map(ToString::to_string).ok_or_else(|| {
                PersistError::MalformedIndices(format!("'{key}' entry is not a string"))
            })
        })
        .collect()
}

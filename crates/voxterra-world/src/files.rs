//! World save directory orchestration.
//!
//! [`WorldFiles`] owns one world directory and coordinates every file in it:
//! world metadata, the pack manifest, the content indices document, resource
//! saved state and the player file, delegating chunk flushing to the region
//! store. It also hosts the two offline migrations that rewrite the indices
//! document in place: forced version patching and pack removal.
//!
//! Directory layout, relative to the world root:
//!
//! ```text
//! world.json       world metadata
//! indices.json     content indices (name list position = runtime id)
//! packs.list       pack manifest, write-once
//! resources.json   per-unit resource saved state
//! player.json      player state (path reserved here, format external)
//! data/            region store
//! content/         installed content packs
//! ```

use crate::document::DocumentExt;
use crate::error::{PersistError, PersistResult};
use crate::pack::{format_packs_list, parse_packs_list, ContentPack};
use crate::region_store::RegionStore;
use crate::registry::{ContentIndices, ResourceType};
use crate::settings::DebugSettings;
use crate::world::World;
use crate::world_info::WorldInfo;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use voxterra_common::{pack_prefix, validate_pack_id, CORE_AIR, CORE_EMPTY};

const WORLD_FILE: &str = "world.json";
const INDICES_FILE: &str = "indices.json";
const PACKS_FILE: &str = "packs.list";
const RESOURCES_FILE: &str = "resources.json";
const PLAYER_FILE: &str = "player.json";
const DATA_DIR: &str = "data";
const CONTENT_DIR: &str = "content";

/// Orchestrator for one world's on-disk representation.
///
/// Designed for single-threaded, synchronous use from the save thread; all
/// writes are whole-document rewrites and callers must serialize operations
/// that touch the same directory.
pub struct WorldFiles {
    directory: PathBuf,
    regions: Box<dyn RegionStore>,
    generator_test_mode: bool,
    write_lights: bool,
}

impl std::fmt::Debug for WorldFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldFiles")
            .field("directory", &self.directory)
            .field("generator_test_mode", &self.generator_test_mode)
            .field("write_lights", &self.write_lights)
            .finish_non_exhaustive()
    }
}

impl WorldFiles {
    /// Creates an orchestrator for a world directory.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, regions: Box<dyn RegionStore>) -> Self {
        Self {
            directory: directory.into(),
            regions,
            generator_test_mode: false,
            write_lights: false,
        }
    }

    /// Creates an orchestrator with debug flags applied and forwarded to the
    /// region store.
    #[must_use]
    pub fn with_settings(
        directory: impl Into<PathBuf>,
        regions: Box<dyn RegionStore>,
        settings: &DebugSettings,
    ) -> Self {
        let mut files = Self::new(directory, regions);
        files.generator_test_mode = settings.generator_test_mode;
        files.write_lights = settings.write_lights;
        files
            .regions
            .set_generator_test_mode(settings.generator_test_mode);
        files.regions.set_write_lights(settings.write_lights);
        files
    }

    /// Idempotently creates the world directory and its `data/` and
    /// `content/` subdirectories.
    pub fn create_directories(&self) -> PersistResult<()> {
        fs::create_dir_all(self.directory.join(DATA_DIR))?;
        fs::create_dir_all(self.directory.join(CONTENT_DIR))?;
        Ok(())
    }

    /// The world root directory.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.directory
    }

    /// Path of the world metadata file.
    #[must_use]
    pub fn world_file(&self) -> PathBuf {
        self.directory.join(WORLD_FILE)
    }

    /// Path of the content indices file.
    #[must_use]
    pub fn indices_file(&self) -> PathBuf {
        self.directory.join(INDICES_FILE)
    }

    /// Path of the pack manifest file.
    #[must_use]
    pub fn packs_file(&self) -> PathBuf {
        self.directory.join(PACKS_FILE)
    }

    /// Path of the resource saved-state file.
    #[must_use]
    pub fn resources_file(&self) -> PathBuf {
        self.directory.join(RESOURCES_FILE)
    }

    /// Path of the player state file.
    #[must_use]
    pub fn player_file(&self) -> PathBuf {
        self.directory.join(PLAYER_FILE)
    }

    /// Persists one session.
    ///
    /// Metadata and the pack manifest are cheap and always attempted first;
    /// the manifest is only written if it does not exist yet, so the recorded
    /// pack set of an existing save never changes retroactively. Under
    /// generator test mode everything after that is skipped, keeping indices
    /// and chunk data consistent (either both are written or neither is).
    pub fn write(
        &mut self,
        world: Option<&World>,
        content: Option<&ContentIndices>,
    ) -> PersistResult<()> {
        if let Some(world) = world {
            self.write_world_info(world.info())?;
            if !self.packs_file().exists() {
                self.write_packs(world.packs())?;
            }
        }
        if self.generator_test_mode {
            return Ok(());
        }
        if let Some(content) = content {
            self.write_indices(content)?;
        }
        self.regions.write_all()?;
        Ok(())
    }

    /// Writes the pack manifest.
    pub fn write_packs(&self, packs: &[ContentPack]) -> PersistResult<()> {
        fs::write(self.packs_file(), format_packs_list(packs))?;
        Ok(())
    }

    /// Reads the pack manifest, empty if it does not exist.
    pub fn read_packs(&self) -> PersistResult<Vec<ContentPack>> {
        let file = self.packs_file();
        if !file.is_file() {
            warn!("{PACKS_FILE} does not exist");
            return Ok(Vec::new());
        }
        parse_packs_list(&fs::read_to_string(file)?)
    }

    /// Writes the versioned content indices document.
    pub fn write_indices(&self, content: &ContentIndices) -> PersistResult<()> {
        write_json(&self.indices_file(), &content.to_document())
    }

    /// Writes the world metadata document.
    pub fn write_world_info(&self, info: &WorldInfo) -> PersistResult<()> {
        write_json(&self.world_file(), &serde_json::to_value(info)?)
    }

    /// Reads world metadata, `None` if the file does not exist.
    ///
    /// A missing file is expected when probing a directory that is not yet a
    /// world, so it is a warning, not an error.
    pub fn read_world_info(&self) -> PersistResult<Option<WorldInfo>> {
        let file = self.world_file();
        if !file.is_file() {
            warn!("{WORLD_FILE} does not exist");
            return Ok(None);
        }
        let root = read_json(&file)?;
        Ok(Some(serde_json::from_value(root)?))
    }

    /// Restores resource saved state into the registry.
    ///
    /// Returns `Ok(false)` if the resources file does not exist. Unknown
    /// resource-type keys and entries whose name no longer resolves are
    /// discarded with a warning: the file may have been written with packs
    /// or engine versions that are gone now.
    pub fn read_resources_data(&self, content: &mut ContentIndices) -> PersistResult<bool> {
        let file = self.resources_file();
        if !file.is_file() {
            warn!("{RESOURCES_FILE} does not exist");
            return Ok(false);
        }
        let root = read_json(&file)?;
        let Some(groups) = root.as_object() else {
            return Err(PersistError::InvalidDocument {
                path: file,
                reason: "root is not an object".to_string(),
            });
        };
        for (key, entries) in groups {
            if let Some(resource) = ResourceType::from_tag(key) {
                apply_resource_entries(content, resource, entries);
            } else {
                warn!("unknown resource type: {key}");
            }
        }
        Ok(true)
    }

    /// Rewrites one top-level field of the indices document to a new version.
    ///
    /// Forced-migration hook for the external version-upgrade driver; fails
    /// without writing anything if the indices file does not exist.
    pub fn patch_indices_version(&self, field: &str, version: u32) -> PersistResult<()> {
        let file = self.indices_file();
        if !file.is_file() {
            error!("{INDICES_FILE} does not exist");
            return Err(PersistError::MissingIndices(file));
        }
        let mut root = read_json(&file)?;
        match root.as_object_mut() {
            Some(map) => {
                map.insert(field.to_string(), Value::from(version));
            }
            None => {
                return Err(PersistError::InvalidDocument {
                    path: file,
                    reason: "root is not an object".to_string(),
                });
            }
        }
        write_json(&file, &root)
    }

    /// Rewrites the indices document after the given packs were uninstalled.
    ///
    /// Every block name owned by a removed pack becomes the reserved air
    /// block and every item name the reserved empty item; positions are never
    /// removed or reordered, so chunk payloads keep resolving. Entity entries
    /// are left untouched. Idempotent: the fallback names belong to the
    /// `core` pack and never match a removed pack's prefix again.
    pub fn remove_indices(&self, pack_ids: &[String]) -> PersistResult<()> {
        for id in pack_ids {
            validate_pack_id(id)?;
        }
        let file = self.indices_file();
        if !file.is_file() {
            error!("{INDICES_FILE} does not exist");
            return Err(PersistError::MissingIndices(file));
        }
        let mut root = read_json(&file)?;
        for id in pack_ids {
            erase_pack_indices(&mut root, id);
        }
        write_json(&file, &root)
    }
}

/// Replaces every name owned by `pack_id` in the block and item lists with
/// the kind's fallback unit.
fn erase_pack_indices(root: &mut Value, pack_id: &str) {
    let prefix = pack_prefix(pack_id);
    replace_prefixed(root.get_mut("blocks"), &prefix, CORE_AIR);
    replace_prefixed(root.get_mut("items"), &prefix, CORE_EMPTY);
}

fn replace_prefixed(list: Option<&mut Value>, prefix: &str, fallback: &str) {
    let Some(Value::Array(entries)) = list else {
        return;
    };
    for entry in entries {
        if entry.as_str().is_some_and(|name| name.starts_with(prefix)) {
            *entry = Value::from(fallback);
        }
    }
}

fn apply_resource_entries(content: &mut ContentIndices, resource: ResourceType, entries: &Value) {
    let index = content.resource_index_mut(resource);
    for entry in entries.as_array().map_or(&[][..], Vec::as_slice) {
        let Some(name) = entry.str_of("name") else {
            warn!("resource entry without a name, discarded");
            continue;
        };
        match index.index_of(name) {
            Some(id) => {
                let saved = entry.get("saved").cloned().unwrap_or(Value::Null);
                index.save_data(id, saved);
            }
            None => warn!("discard {name}"),
        }
    }
}

fn read_json(path: &Path) -> PersistResult<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn write_json(path: &Path, root: &Value) -> PersistResult<()> {
    let mut text = serde_json::to_string_pretty(root)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BlockDef, EntityDef, ItemDef};
    use serde_json::json;
    use std::io;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Region store double that records flushes and flag changes.
    #[derive(Default)]
    struct RecordingRegions {
        flushes: Arc<AtomicUsize>,
        test_mode: Arc<AtomicBool>,
        lights: Arc<AtomicBool>,
    }

    impl RegionStore for RecordingRegions {
        fn write_all(&mut self) -> io::Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn set_generator_test_mode(&mut self, enabled: bool) {
            self.test_mode.store(enabled, Ordering::SeqCst);
        }

        fn set_write_lights(&mut self, enabled: bool) {
            self.lights.store(enabled, Ordering::SeqCst);
        }
    }

    struct Fixture {
        dir: TempDir,
        flushes: Arc<AtomicUsize>,
        files: WorldFiles,
    }

    fn fixture() -> Fixture {
        fixture_with(&DebugSettings::default())
    }

    fn fixture_with(settings: &DebugSettings) -> Fixture {
        let dir = TempDir::new().expect("temp dir should be created");
        let regions = RecordingRegions::default();
        let flushes = Arc::clone(&regions.flushes);
        let files = WorldFiles::with_settings(dir.path(), Box::new(regions), settings);
        files
            .create_directories()
            .expect("create_directories should succeed");
        Fixture { dir, flushes, files }
    }

    fn sample_world(packs: &[&str]) -> World {
        let packs = packs
            .iter()
            .map(|id| ContentPack::new(*id).expect("valid pack id"))
            .collect();
        World::new(WorldInfo::new("Test World", 42), packs)
    }

    fn sample_content() -> ContentIndices {
        let mut content = ContentIndices::with_core_units();
        content.blocks.add(BlockDef::new("core:stone"));
        content.blocks.add(BlockDef::new("modA:ore"));
        content.items.add(ItemDef::new("modA:ingot"));
        content.items.add(ItemDef::new("modAX:gem"));
        content.entities.add(EntityDef::new("modA:drone"));
        content
    }

    #[test]
    fn test_create_directories_is_idempotent() {
        let fx = fixture();
        fx.files
            .create_directories()
            .expect("second call should succeed");
        assert!(fx.dir.path().join("data").is_dir());
        assert!(fx.dir.path().join("content").is_dir());
    }

    #[test]
    fn test_path_accessors_are_rooted_in_directory() {
        let fx = fixture();
        assert_eq!(fx.files.folder(), fx.dir.path());
        assert_eq!(fx.files.world_file(), fx.dir.path().join("world.json"));
        assert_eq!(fx.files.indices_file(), fx.dir.path().join("indices.json"));
        assert_eq!(fx.files.packs_file(), fx.dir.path().join("packs.list"));
        assert_eq!(
            fx.files.resources_file(),
            fx.dir.path().join("resources.json")
        );
        assert_eq!(fx.files.player_file(), fx.dir.path().join("player.json"));
    }

    #[test]
    fn test_write_persists_metadata_indices_and_flushes() {
        let mut fx = fixture();
        let world = sample_world(&["core", "modA"]);
        let content = sample_content();

        fx.files
            .write(Some(&world), Some(&content))
            .expect("write should succeed");

        assert!(fx.files.world_file().is_file());
        assert!(fx.files.packs_file().is_file());
        assert!(fx.files.indices_file().is_file());
        assert_eq!(fx.flushes.load(Ordering::SeqCst), 1);

        let info = fx
            .files
            .read_world_info()
            .expect("read should succeed")
            .expect("world.json should parse");
        assert_eq!(info.name, "Test World");
        assert_eq!(info.seed, 42);
    }

    #[test]
    fn test_pack_manifest_is_write_once() {
        let mut fx = fixture();
        fx.files
            .write(Some(&sample_world(&["core", "modA"])), None)
            .expect("first write should succeed");
        let first = fs::read(fx.files.packs_file()).expect("manifest should exist");

        fx.files
            .write(Some(&sample_world(&["core", "modB", "modC"])), None)
            .expect("second write should succeed");
        let second = fs::read(fx.files.packs_file()).expect("manifest should exist");

        assert_eq!(first, second);
        let packs = fx.files.read_packs().expect("read_packs should succeed");
        assert_eq!(packs, sample_world(&["core", "modA"]).packs());
    }

    #[test]
    fn test_generator_test_mode_suppresses_indices_and_flush() {
        let settings = DebugSettings {
            generator_test_mode: true,
            write_lights: false,
        };
        let mut fx = fixture_with(&settings);

        fx.files
            .write(Some(&sample_world(&["core"])), Some(&sample_content()))
            .expect("write should succeed");

        assert!(fx.files.world_file().is_file());
        assert!(!fx.files.indices_file().exists());
        assert_eq!(fx.flushes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_settings_forwarded_to_region_store() {
        let dir = TempDir::new().expect("temp dir should be created");
        let regions = RecordingRegions::default();
        let test_mode = Arc::clone(&regions.test_mode);
        let lights = Arc::clone(&regions.lights);
        let settings = DebugSettings {
            generator_test_mode: true,
            write_lights: true,
        };
        let _files = WorldFiles::with_settings(dir.path(), Box::new(regions), &settings);

        assert!(test_mode.load(Ordering::SeqCst));
        assert!(lights.load(Ordering::SeqCst));
    }

    #[test]
    fn test_read_world_info_missing_is_none() {
        let fx = fixture();
        let info = fx.files.read_world_info().expect("read should succeed");
        assert!(info.is_none());
    }

    #[test]
    fn test_read_resources_missing_is_false() {
        let fx = fixture();
        let mut content = sample_content();
        let loaded = fx
            .files
            .read_resources_data(&mut content)
            .expect("read should succeed");
        assert!(!loaded);
    }

    #[test]
    fn test_read_resources_applies_known_and_discards_stale() {
        let fx = fixture();
        let mut content = sample_content();
        let id = content
            .resource_index_mut(ResourceType::Camera)
            .add("core:first-person");

        let doc = json!({
            "camera": [
                {"name": "core:first-person", "saved": {"fov": 90}},
                {"name": "modGone:cinematic", "saved": {"fov": 30}},
            ],
            "shader-pack": [
                {"name": "core:default", "saved": {}},
            ],
        });
        write_json(&fx.files.resources_file(), &doc).expect("write should succeed");

        let loaded = fx
            .files
            .read_resources_data(&mut content)
            .expect("read should succeed");
        assert!(loaded);

        let cameras = content.resource_index(ResourceType::Camera);
        assert_eq!(cameras.saved_data(id), Some(&json!({"fov": 90})));
        assert_eq!(cameras.len(), 1);
    }

    #[test]
    fn test_patch_indices_version_rewrites_one_field() {
        let fx = fixture();
        fx.files
            .write_indices(&sample_content())
            .expect("write should succeed");

        fx.files
            .patch_indices_version("region-version", 4)
            .expect("patch should succeed");

        let root = read_json(&fx.files.indices_file()).expect("read should succeed");
        assert_eq!(root["region-version"], 4);
        // Everything else untouched
        assert_eq!(root["blocks"], sample_content().to_document()["blocks"]);
    }

    #[test]
    fn test_patch_indices_version_missing_file_fails() {
        let fx = fixture();
        let result = fx.files.patch_indices_version("region-version", 4);
        assert!(matches!(result, Err(PersistError::MissingIndices(_))));
        assert!(!fx.files.indices_file().exists());
    }

    #[test]
    fn test_remove_indices_replaces_owned_names_in_place() {
        let fx = fixture();
        fx.files
            .write_indices(&sample_content())
            .expect("write should succeed");

        fx.files
            .remove_indices(&["modA".to_string()])
            .expect("removal should succeed");

        let root = read_json(&fx.files.indices_file()).expect("read should succeed");
        assert_eq!(
            root["blocks"],
            json!(["core:air", "core:stone", "core:air"])
        );
        // "modAX:" shares no "modA:" prefix boundary and must survive
        assert_eq!(
            root["items"],
            json!(["core:empty", "core:empty", "modAX:gem"])
        );
        // Entities are intentionally untouched
        assert_eq!(root["entities"], json!(["modA:drone"]));
    }

    #[test]
    fn test_remove_indices_is_idempotent() {
        let fx = fixture();
        fx.files
            .write_indices(&sample_content())
            .expect("write should succeed");

        fx.files
            .remove_indices(&["modA".to_string()])
            .expect("first removal should succeed");
        let once = fs::read(fx.files.indices_file()).expect("indices should exist");

        fx.files
            .remove_indices(&["modA".to_string()])
            .expect("second removal should succeed");
        let twice = fs::read(fx.files.indices_file()).expect("indices should exist");

        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_indices_rejects_invalid_pack_id() {
        let fx = fixture();
        fx.files
            .write_indices(&sample_content())
            .expect("write should succeed");

        let result = fx.files.remove_indices(&["bad:id".to_string()]);
        assert!(matches!(result, Err(PersistError::InvalidPackId(_))));
    }

    mod migration_properties {
        use super::*;
        use proptest::prelude::*;

        /// Names owned by a small closed set of packs, plus the fallbacks.
        fn unit_name() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("core:air".to_string()),
                Just("core:stone".to_string()),
                "(modA|modAX|modB):[a-z]{1,8}",
            ]
        }

        fn indices_doc() -> impl Strategy<Value = Value> {
            (
                proptest::collection::vec(unit_name(), 0..12),
                proptest::collection::vec(unit_name(), 0..12),
                proptest::collection::vec(unit_name(), 0..12),
            )
                .prop_map(|(blocks, items, entities)| {
                    json!({
                        "region-version": 3,
                        "blocks": blocks,
                        "items": items,
                        "entities": entities,
                    })
                })
        }

        proptest! {
            #[test]
            fn removal_is_idempotent(doc in indices_doc()) {
                let mut once = doc.clone();
                erase_pack_indices(&mut once, "modA");
                let mut twice = once.clone();
                erase_pack_indices(&mut twice, "modA");
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn removal_touches_only_owned_positions(doc in indices_doc()) {
                let mut migrated = doc.clone();
                erase_pack_indices(&mut migrated, "modA");

                for key in ["blocks", "items"] {
                    let before = doc[key].as_array().expect("list");
                    let after = migrated[key].as_array().expect("list");
                    prop_assert_eq!(before.len(), after.len());
                    let fallback = if key == "blocks" { CORE_AIR } else { CORE_EMPTY };
                    for (old, new) in before.iter().zip(after) {
                        let name = old.as_str().expect("name");
                        if name.starts_with("modA:") {
                            prop_assert_eq!(new, fallback);
                        } else {
                            prop_assert_eq!(new, old);
                        }
                    }
                }
                // Entity list is never migrated
                prop_assert_eq!(&doc["entities"], &migrated["entities"]);
            }
        }
    }
}

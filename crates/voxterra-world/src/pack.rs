//! Content pack references and the pack manifest format.
//!
//! A world records which packs it was created with in `packs.list`: a header
//! comment followed by one pack id per line. The manifest is write-once per
//! world directory; it must keep describing the original pack set even after
//! packs are removed (migration rewrites indices, not the manifest).

use crate::error::PersistResult;
use voxterra_common::validate_pack_id;

/// Header line written at the top of `packs.list`.
pub const PACKS_HEADER: &str = "# autogenerated; do not modify";

/// Reference to an installed content pack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentPack {
    /// Pack id, used as the namespacing prefix for unit names.
    pub id: String,
}

impl ContentPack {
    /// Creates a validated pack reference.
    pub fn new(id: impl Into<String>) -> PersistResult<Self> {
        let id = id.into();
        validate_pack_id(&id)?;
        Ok(Self { id })
    }
}

/// Formats the pack manifest file contents.
#[must_use]
pub fn format_packs_list(packs: &[ContentPack]) -> String {
    let mut out = String::from(PACKS_HEADER);
    out.push('\n');
    for pack in packs {
        out.push_str(&pack.id);
        out.push('\n');
    }
    out
}

/// Parses a pack manifest, skipping comments and blank lines.
pub fn parse_packs_list(text: &str) -> PersistResult<Vec<ContentPack>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ContentPack::new)
        .collect()
}

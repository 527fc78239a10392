//! On-disk format version constants.

/// Current region file format version, recorded in the indices document as
/// `region-version` and consulted by the region store when opening old saves.
pub const REGION_FORMAT_VERSION: u32 = 3;

/// Current world metadata document version.
pub const WORLD_FORMAT_VERSION: u32 = 1;

/// Top-level field of the indices document holding the region format version.
pub const REGION_VERSION_FIELD: &str = "region-version";

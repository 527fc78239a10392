//! Region store collaborator seam.
//!
//! The region store owns the binary chunk format under the world's `data/`
//! directory; its internals are not this crate's concern. [`WorldFiles`]
//! only needs the narrow contract below: flush everything dirty, and two
//! behavior flags forwarded from debug settings.
//!
//! [`WorldFiles`]: crate::files::WorldFiles

use std::io;

/// Durable storage of voxel chunk payloads, addressed by region coordinates.
///
/// Implementations perform their own dirty tracking, so `write_all` only
/// touches regions mutated since the last flush.
pub trait RegionStore {
    /// Writes every pending region to disk.
    fn write_all(&mut self) -> io::Result<()>;

    /// Toggles generator test mode; an enabled store must not persist chunks.
    fn set_generator_test_mode(&mut self, enabled: bool);

    /// Toggles writing of computed light data alongside voxel data.
    fn set_write_lights(&mut self, enabled: bool);
}

//! Well-known content-unit names and pack-id rules.
//!
//! Content-unit names are namespaced as `"<pack>:<unit>"`. The two fallback
//! units below are owned by the built-in `core` pack and are agreed upon by
//! the content registry and the region store: migration rewrites indices that
//! belonged to a removed pack to these names, so chunk payloads keep resolving
//! to a valid unit.

use thiserror::Error;

/// Name of the reserved air block, the fallback for removed block indices.
pub const CORE_AIR: &str = "core:air";

/// Name of the reserved empty item, the fallback for removed item indices.
pub const CORE_EMPTY: &str = "core:empty";

/// Id of the built-in pack that owns the fallback units.
pub const CORE_PACK_ID: &str = "core";

/// Error returned for a malformed content pack id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackIdError {
    /// Pack id is empty
    #[error("pack id is empty")]
    Empty,

    /// Pack id contains a colon, which would break prefix namespacing
    #[error("pack id '{0}' contains ':'")]
    ContainsColon(String),
}

/// Validates a content pack id.
///
/// Pack ids namespace unit names by the literal prefix `"<id>:"`, so an id
/// containing a colon would make prefix matching ambiguous. Rejected here,
/// never assumed.
pub fn validate_pack_id(id: &str) -> Result<(), PackIdError> {
    if id.is_empty() {
        return Err(PackIdError::Empty);
    }
    if id.contains(':') {
        return Err(PackIdError::ContainsColon(id.to_string()));
    }
    Ok(())
}

/// Returns the namespacing prefix a pack owns: `"<id>:"`.
#[must_use]
pub fn pack_prefix(id: &str) -> String {
    format!("{id}:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_names_belong_to_core() {
        assert!(CORE_AIR.starts_with(&pack_prefix(CORE_PACK_ID)));
        assert!(CORE_EMPTY.starts_with(&pack_prefix(CORE_PACK_ID)));
    }

    #[test]
    fn test_prefix_does_not_cross_pack_boundary() {
        // "mod" must not claim units of "mod2"
        assert!(!"mod2:thing".starts_with(&pack_prefix("mod")));
        assert!("mod:thing".starts_with(&pack_prefix("mod")));
    }

    #[test]
    fn test_colon_in_pack_id_rejected() {
        assert_eq!(
            validate_pack_id("a:b"),
            Err(PackIdError::ContainsColon("a:b".to_string()))
        );
    }
}

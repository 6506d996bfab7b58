//! Deterministic 64-bit join key, grounded on
//! `diffhouse.pipelines.utils.fast_hash_64`.
//!
//! Used only to join [`crate::pipelines::filemod`]'s two log passes and to
//! cross-reference [`crate::model::Diff`] records with their
//! [`crate::model::FileMod`]. Collisions within one commit's file set are
//! astronomically unlikely and are not guarded against.

/// ASCII unit separator, used to join hashed fields unambiguously.
const FIELD_JOIN_SEP: u8 = 0x1F;

/// Hashes `fields` joined by a single `0x1F` byte, rendered as 16 lowercase
/// hex digits.
pub fn hash_key<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = Vec::new();
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            joined.push(FIELD_JOIN_SEP);
        }
        joined.extend_from_slice(field.as_ref().as_bytes());
    }
    let digest = xxhash_rust::xxh64::xxh64(&joined, 0);
    format!("{digest:016x}")
}

/// Shorthand for the three-field key `(commit_hash, path_a, path_b)` used
/// by both the file-modification and diff pipelines.
pub fn filemod_id(commit_hash: &str, path_a: &str, path_b: &str) -> String {
    hash_key([commit_hash, path_a, path_b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_deterministic() {
        let a = filemod_id("abc123", "src/lib.rs", "src/lib.rs");
        let b = filemod_id("abc123", "src/lib.rs", "src/lib.rs");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn distinguishes_field_boundaries() {
        // Without a separator, ("ab", "c") and ("a", "bc") would collide.
        let a = hash_key(["ab", "c"]);
        let b = hash_key(["a", "bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn distinguishes_paths() {
        let a = filemod_id("abc123", "a.rs", "b.rs");
        let b = filemod_id("abc123", "b.rs", "a.rs");
        assert_ne!(a, b);
    }
}

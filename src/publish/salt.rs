//! Output path derivation.
//!
//! Every bundle publishes into its own directory under the public root:
//!
//! ```text
//! <public>/<salt>/[<name>/]<source dir>/<source file>
//! ```
//!
//! The salt is the first 10 hex chars of `blake3(key + build_time)`. It is
//! stable for one build generation and changes for every bundle whenever
//! the sentinel's mtime changes.

use std::path::{Component, Path, PathBuf};

use crate::bundle::BundleKey;

/// Length of the salt in hex characters.
pub const SALT_LEN: usize = 10;

/// Derive the per-bundle directory salt.
pub fn bundle_salt(key: &BundleKey, build_time: i64) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(key.as_str().as_bytes());
    hasher.update(build_time.to_string().as_bytes());
    let mut hex = hex::encode(&hasher.finalize().as_bytes()[..SALT_LEN / 2]);
    hex.truncate(SALT_LEN);
    hex
}

/// On-disk location of a descriptor's primary source inside a bundle directory.
///
/// Only normal components of `source` are kept: a leading `/` is ignored,
/// so `/css/a.css` and `css/a.css` land on the same file, and `..` never
/// climbs out of the bundle directory.
pub fn published_path(bundle_dir: &Path, name: &str, source: &str) -> PathBuf {
    let mut path = bundle_dir.to_path_buf();
    if !name.is_empty() {
        path.push(name);
    }
    path.extend(Path::new(source).components().filter_map(|c| match c {
        Component::Normal(part) => Some(part),
        _ => None,
    }));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_salt_is_stable() {
        let key = BundleKey::from("app");
        assert_eq!(bundle_salt(&key, 1_700_000_000), bundle_salt(&key, 1_700_000_000));
        assert_eq!(bundle_salt(&key, 1).len(), SALT_LEN);
        assert!(bundle_salt(&key, 1).chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_salt_changes_with_build_time() {
        let key = BundleKey::from("app");
        assert_ne!(bundle_salt(&key, 1), bundle_salt(&key, 2));
    }

    #[test]
    fn test_salts_differ_across_keys() {
        let salts: FxHashSet<_> = (0..1000)
            .map(|i| bundle_salt(&BundleKey::from(format!("bundle-{i}")), 1_700_000_000))
            .collect();
        assert_eq!(salts.len(), 1000);
    }

    #[test]
    fn test_published_path() {
        let dir = Path::new("/public/abcdef0123");
        assert_eq!(
            published_path(dir, "", "/css/style1.css"),
            PathBuf::from("/public/abcdef0123/css/style1.css")
        );
        assert_eq!(
            published_path(dir, "concrete", "js/a.js"),
            PathBuf::from("/public/abcdef0123/concrete/js/a.js")
        );
    }

    #[test]
    fn test_published_path_stays_in_bundle_dir() {
        let dir = Path::new("/public/abcdef0123");
        let path = published_path(dir, "", "../../etc/./site.css");
        assert_eq!(path, PathBuf::from("/public/abcdef0123/etc/site.css"));
        assert!(path.starts_with(dir));
    }
}

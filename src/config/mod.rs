//! Manifest (`assetpress.toml`) loading.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/     # [publish] and [[bundle]] definitions
//! ├── error        # ConfigError
//! ├── util         # Manifest lookup
//! └── mod.rs       # Manifest (this file)
//! ```
//!
//! Relative paths in the manifest are resolved against the manifest's
//! directory after `~` expansion.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{BundleConfig, PublishOptions, TagConfig};
pub use util::find_config_file;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::bundle::StaticBundle;
use crate::log;
use crate::publish::is_valid_category;
use crate::utils::path::resolve_path;

/// Default manifest file name.
pub const MANIFEST_NAME: &str = "assetpress.toml";

/// Root structure of `assetpress.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Absolute path to the manifest (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Manifest directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub publish: PublishOptions,

    #[serde(default, rename = "bundle")]
    pub bundles: Vec<BundleConfig>,
}

impl Manifest {
    /// Locate the manifest (searching upward from cwd) and load it.
    pub fn load(config_name: &Path) -> Result<Self, ConfigError> {
        let path = find_config_file(config_name).ok_or_else(|| {
            ConfigError::Io(
                config_name.to_path_buf(),
                io::Error::new(io::ErrorKind::NotFound, "manifest not found"),
            )
        })?;
        Self::from_path(&path)
    }

    /// Load, resolve and validate the manifest at `path`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut manifest, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        manifest.config_path = path.to_path_buf();
        manifest.finalize(&root);
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let manifest = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((manifest, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve every path against the manifest directory.
    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.publish.runtime_path =
            resolve_path(&self.publish.runtime_path.to_string_lossy(), root);
        self.publish.public_path = resolve_path(&self.publish.public_path.to_string_lossy(), root);
        for bundle in &mut self.bundles {
            bundle.resolve_path(root);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut keys = FxHashSet::default();
        for bundle in &self.bundles {
            if bundle.key.is_empty() {
                return Err(ConfigError::Validation("bundle with empty key".into()));
            }
            if !keys.insert(bundle.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate bundle key `{}`",
                    bundle.key
                )));
            }
            if !is_valid_category(&bundle.category) {
                return Err(ConfigError::Validation(format!(
                    "bundle `{}`: invalid category `{}`",
                    bundle.key, bundle.category
                )));
            }
            if let Some(idx) = bundle.tags.iter().position(|t| t.src.is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "bundle `{}`: tag #{} has no src",
                    bundle.key,
                    idx + 1
                )));
            }
        }
        Ok(())
    }

    /// Runtime bundles paired with their category, in manifest order.
    pub fn bundles(&self) -> Result<Vec<(String, StaticBundle)>, ConfigError> {
        self.bundles
            .iter()
            .map(|config| Ok((config.category.clone(), config.to_bundle()?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[publish]
host = "https://localhost/"
runtime_path = "var"
public_path = "web/assets"
lock_build = false

[[bundle]]
key = "jquery"
path = "vendor/jquery"
category = "top"

[[bundle.tag]]
kind = "script"
src = ["/jquery.js"]

[[bundle]]
key = "app"
path = "/srv/app"
depends = ["jquery"]

[[bundle.tag]]
kind = "stylesheet"
src = ["/css/a.css", "/css/b.css"]
"#;

    fn write_manifest(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_NAME);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result: Result<Manifest, _> = toml::from_str("[publish\nhost = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_resolves_paths() {
        let (dir, path) = write_manifest(SAMPLE);
        let manifest = Manifest::from_path(&path).unwrap();

        assert_eq!(manifest.root, dir.path());
        assert_eq!(manifest.publish.runtime_path, dir.path().join("var"));
        assert_eq!(manifest.publish.public_path, dir.path().join("web/assets"));
        assert_eq!(manifest.bundles[0].path, dir.path().join("vendor/jquery"));
        assert_eq!(manifest.bundles[1].path, PathBuf::from("/srv/app"));
        assert!(!manifest.publish.lock_build);
    }

    #[test]
    fn test_bundles_in_manifest_order() {
        let (_dir, path) = write_manifest(SAMPLE);
        let manifest = Manifest::from_path(&path).unwrap();
        let bundles = manifest.bundles().unwrap();

        let categories: Vec<_> = bundles.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(categories, ["top", "common"]);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[publish]\nhost = \"x\"\nhots = \"typo\"\n[unknown_section]\nfield = 1";
        let (manifest, ignored) = Manifest::parse_with_ignored(content).unwrap();

        assert_eq!(manifest.publish.host, "x");
        assert!(ignored.iter().any(|f| f.contains("hots")));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = Manifest::parse_with_ignored(SAMPLE).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let (_dir, path) = write_manifest(
            "[[bundle]]\nkey = \"a\"\npath = \".\"\n[[bundle]]\nkey = \"a\"\npath = \".\"",
        );
        assert!(matches!(
            Manifest::from_path(&path),
            Err(ConfigError::Validation(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn test_duplicate_key_after_distinct_keys() {
        let (_dir, path) = write_manifest(
            "[[bundle]]\nkey = \"a\"\npath = \".\"\n\
             [[bundle]]\nkey = \"b\"\npath = \".\"\n\
             [[bundle]]\nkey = \"b\"\npath = \".\"",
        );
        assert!(matches!(
            Manifest::from_path(&path),
            Err(ConfigError::Validation(msg)) if msg == "duplicate bundle key `b`"
        ));
    }

    #[test]
    fn test_invalid_category_rejected() {
        let (_dir, path) =
            write_manifest("[[bundle]]\nkey = \"a\"\npath = \".\"\ncategory = \"a/b\"");
        assert!(matches!(
            Manifest::from_path(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Manifest::from_path(&dir.path().join(MANIFEST_NAME)),
            Err(ConfigError::Io(..))
        ));
    }
}

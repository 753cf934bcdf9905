//! `salt` command: locate a bundle's output directory.

use anyhow::{Result, bail};

use super::common::open_publisher;
use crate::bundle::BundleKey;
use crate::config::Manifest;

/// Output directory of the bundle `key` under the current baseline.
pub fn bundle_dir(manifest: &Manifest, key: &str) -> Result<String> {
    if !manifest.bundles.iter().any(|b| b.key == key) {
        bail!("no bundle `{key}` in {}", manifest.config_path.display());
    }
    let mut publisher = open_publisher(manifest)?;
    let dir = publisher.bundle_output_dir(&BundleKey::from(key));
    Ok(dir.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BundleConfig, PublishOptions};
    use crate::publish::bundle_salt;
    use tempfile::TempDir;

    #[test]
    fn test_bundle_dir() {
        let dir = TempDir::new().unwrap();
        let bundle: BundleConfig =
            toml::from_str(&format!("key = \"app\"\npath = {:?}", dir.path())).unwrap();
        let manifest = Manifest {
            publish: PublishOptions {
                runtime_path: dir.path().join("var"),
                public_path: dir.path().join("web"),
                ..PublishOptions::default()
            },
            bundles: vec![bundle],
            ..Manifest::default()
        };

        let out = bundle_dir(&manifest, "app").unwrap();
        let salt = out.rsplit('/').next().unwrap();
        assert_eq!(salt.len(), crate::publish::SALT_LEN);

        let build_time = crate::freshness::mtime_secs(&dir.path().join("web/.asset_build")).unwrap();
        assert_eq!(salt, bundle_salt(&BundleKey::from("app"), build_time));
    }

    #[test]
    fn test_unknown_key() {
        let manifest = Manifest::default();
        assert!(bundle_dir(&manifest, "ghost").is_err());
    }
}

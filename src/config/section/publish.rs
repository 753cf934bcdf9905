//! `[publish]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [publish]
//! host = "https://static.example.com"   # Used for absolute URLs (//host/...)
//! runtime_path = "var/runtime"          # Markup cache lives under <runtime_path>/<runtime_dir>
//! public_path = "web/assets"            # Web-served output root
//! lock_build = true                     # Reuse cached markup until reset
//! symlink = true                        # Mirror dist files as symlinks
//! dir_mode = 0o755                      # Mode for created directories
//! url_prefix = "/assets"                # Path of public_path as seen from the web root
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Publisher construction options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishOptions {
    /// Host for absolute URLs. Scheme and trailing slash are stripped.
    pub host: String,

    /// Runtime (non-public) directory holding the markup cache.
    pub runtime_path: PathBuf,

    /// Public output root.
    pub public_path: PathBuf,

    /// Reuse persisted markup instead of re-checking bundles.
    pub lock_build: bool,

    /// Mirror dist files as symlinks rather than copies.
    pub symlink: bool,

    /// Unix mode for every directory created.
    pub dir_mode: u32,

    /// Sentinel file name under `public_path`.
    pub build_file: String,

    /// Cache subdirectory under `runtime_path`.
    pub runtime_dir: String,

    /// Prepended to local URL paths, e.g. `/assets`.
    pub url_prefix: String,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            runtime_path: PathBuf::from("runtime"),
            public_path: PathBuf::from("public"),
            lock_build: true,
            symlink: true,
            dir_mode: 0o755,
            build_file: ".asset_build".into(),
            runtime_dir: "assetpress".into(),
            url_prefix: String::new(),
        }
    }
}

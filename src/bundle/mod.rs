//! Bundles: named groups of descriptors sharing a base path.
//!
//! A bundle is identified by a [`BundleKey`], which must be unique across the
//! whole publisher. The key, not the bundle's concrete type, decides the
//! bundle's output directory, so two instances of one type need distinct keys.

use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::tag::Descriptor;
use crate::utils::path::normalize_path;

/// Stable identity of a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BundleKey(String);

impl BundleKey {
    /// Key for a bundle type, optionally disambiguated by instance name.
    ///
    /// `BundleKey::new("jquery", "")` → `jquery`,
    /// `BundleKey::new("theme", "dark")` → `theme:dark`.
    pub fn new(kind: &str, instance: &str) -> Self {
        if instance.is_empty() {
            Self(kind.to_string())
        } else {
            Self(format!("{kind}:{instance}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BundleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BundleKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BundleKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for BundleKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A source of descriptors plus the files they live next to.
///
/// Implementations must return stable values for the life of the process:
/// the publisher may call these methods any number of times, except on a
/// markup-cache hit, where none of them is called.
pub trait Bundle: Send + Sync {
    fn key(&self) -> BundleKey;

    /// Directory that descriptor sources and dist paths are relative to.
    fn base_path(&self) -> &Path;

    /// Instance name. Non-empty names are appended to the base path when
    /// reading sources, and to the bundle's output directory.
    fn name(&self) -> &str {
        ""
    }

    /// Files or directories (relative to base + name) mirrored verbatim.
    fn dist_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Keys of bundles that must be published before this one.
    fn dependencies(&self) -> Vec<BundleKey> {
        Vec::new()
    }

    fn descriptors(&self) -> Vec<Descriptor>;

    /// Base path with the instance name applied.
    fn source_root(&self) -> PathBuf {
        match self.name() {
            "" => self.base_path().to_path_buf(),
            name => self.base_path().join(name),
        }
    }
}

/// Plain-data bundle, e.g. built from a manifest.
///
/// The base path is resolved to an absolute path on first use and memoized.
#[derive(Debug)]
pub struct StaticBundle {
    key: BundleKey,
    path: PathBuf,
    resolved: OnceLock<PathBuf>,
    name: String,
    dist: Vec<PathBuf>,
    depends: Vec<BundleKey>,
    descriptors: Vec<Descriptor>,
}

impl StaticBundle {
    pub fn new(key: impl Into<BundleKey>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            resolved: OnceLock::new(),
            name: String::new(),
            dist: Vec::new(),
            depends: Vec::new(),
            descriptors: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_dist(mut self, path: impl Into<PathBuf>) -> Self {
        self.dist.push(path.into());
        self
    }

    pub fn with_dependency(mut self, key: impl Into<BundleKey>) -> Self {
        self.depends.push(key.into());
        self
    }

    pub fn with_descriptor(mut self, descriptor: impl Into<Descriptor>) -> Self {
        self.descriptors.push(descriptor.into());
        self
    }
}

impl Bundle for StaticBundle {
    fn key(&self) -> BundleKey {
        self.key.clone()
    }

    fn base_path(&self) -> &Path {
        self.resolved.get_or_init(|| normalize_path(&self.path))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dist_paths(&self) -> Vec<PathBuf> {
        self.dist.clone()
    }

    fn dependencies(&self) -> Vec<BundleKey> {
        self.depends.clone()
    }

    fn descriptors(&self) -> Vec<Descriptor> {
        self.descriptors.clone()
    }
}

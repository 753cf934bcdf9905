//! `[[bundle]]` entries.
//!
//! # Example
//!
//! ```toml
//! [[bundle]]
//! key = "theme"
//! path = "vendor/theme"
//! name = "dark"              # Optional instance directory under path
//! category = "top"           # top | bottom | common (default) | any [\w.-]+
//! dist = ["fonts", "img"]    # Mirrored verbatim
//! depends = ["jquery"]       # Published first
//!
//! [[bundle.tag]]
//! kind = "stylesheet"
//! src = ["/css/reset.css", "/css/site.css"]
//! minimize = true
//! attrs = { media = "screen" }
//!
//! [[bundle.tag]]
//! kind = "script"
//! src = ["https://cdn.example.com/app.js"]
//! remote = true
//! attrs = { async = true }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bundle::StaticBundle;
use crate::config::ConfigError;
use crate::publish::CATEGORY_COMMON;
use crate::tag::{Descriptor, TagKind};

fn default_category() -> String {
    CATEGORY_COMMON.to_string()
}

/// One bundle declared in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Unique key; drives the output directory salt.
    pub key: String,

    /// Base path, relative to the manifest directory.
    pub path: PathBuf,

    #[serde(default)]
    pub name: String,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub dist: Vec<PathBuf>,

    #[serde(default)]
    pub depends: Vec<String>,

    #[serde(default, rename = "tag")]
    pub tags: Vec<TagConfig>,
}

/// One descriptor of a bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagConfig {
    pub kind: TagKind,

    pub src: Vec<String>,

    #[serde(default)]
    pub minimize: bool,

    #[serde(default)]
    pub relative: bool,

    #[serde(default)]
    pub remote: bool,

    /// Append `?ts=<unixtime>` to the URL.
    #[serde(default)]
    pub timestamp: bool,

    /// Extra attributes in declaration order.
    /// String values render `name="value"`, `true` renders a bare attribute.
    #[serde(default)]
    pub attrs: toml::Table,
}

impl TagConfig {
    pub fn to_descriptor(&self) -> Result<Descriptor, ConfigError> {
        let mut builder = Descriptor::builder(self.kind, self.src.iter().cloned());
        if self.minimize {
            builder = builder.minimize();
        }
        if self.relative {
            builder = builder.relative();
        }
        if self.remote {
            builder = builder.remote();
        }
        if self.timestamp {
            builder = builder.with_timestamp();
        }
        for (name, value) in &self.attrs {
            builder = match value {
                toml::Value::String(text) => builder.attr(name.as_str(), text.as_str()),
                toml::Value::Boolean(true) => builder.flag(name.as_str()),
                toml::Value::Boolean(false) => builder,
                other => {
                    return Err(ConfigError::Validation(format!(
                        "attribute `{name}` must be a string or a boolean, got {}",
                        other.type_str()
                    )));
                }
            };
        }
        Ok(builder.build())
    }
}

impl BundleConfig {
    /// Build the runtime bundle. `path` must already be resolved.
    pub fn to_bundle(&self) -> Result<StaticBundle, ConfigError> {
        let mut bundle = StaticBundle::new(self.key.as_str(), self.path.as_path());
        if !self.name.is_empty() {
            bundle = bundle.with_name(self.name.as_str());
        }
        for dist in &self.dist {
            bundle = bundle.with_dist(dist.as_path());
        }
        for dep in &self.depends {
            bundle = bundle.with_dependency(dep.as_str());
        }
        for tag in &self.tags {
            bundle = bundle.with_descriptor(tag.to_descriptor()?);
        }
        Ok(bundle)
    }

    pub(crate) fn resolve_path(&mut self, root: &Path) {
        self.path = crate::utils::path::resolve_path(&self.path.to_string_lossy(), root);
    }
}

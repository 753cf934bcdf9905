//! Content transform gateway.
//!
//! The orchestrator never minifies anything itself. It hands a descriptor's
//! sources to the [`Transform`] registered for the descriptor's [`TagKind`]
//! and publishes whatever text comes back.
//!
//! ```text
//! descriptor ─► resolve sources (drop missing) ─► TransformTable[kind] ─► Option<String>
//! ```

pub mod minify;

use std::fmt;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::tag::{Descriptor, TagKind};

pub use minify::{ScriptTransform, StylesheetTransform};

/// Errors raised while producing publishable content.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to read source `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("no transform registered for `{0}` tags")]
    Unsupported(TagKind),
}

/// Merge/optimize capability for one tag kind.
pub trait Transform: Send + Sync {
    /// Produce the published text for `sources`, in order.
    ///
    /// Every path in `sources` exists. Returns `None` when there is nothing
    /// to publish.
    fn apply(&self, sources: &[PathBuf], optimize: bool) -> Result<Option<String>, TransformError>;
}

impl<F> Transform for F
where
    F: Fn(&[PathBuf], bool) -> Result<Option<String>, TransformError> + Send + Sync,
{
    fn apply(&self, sources: &[PathBuf], optimize: bool) -> Result<Option<String>, TransformError> {
        self(sources, optimize)
    }
}

/// Strategy table: tag kind → transform.
pub struct TransformTable {
    entries: FxHashMap<TagKind, Box<dyn Transform>>,
}

impl TransformTable {
    /// Empty table. Every lookup fails until kinds are registered.
    pub fn empty() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Register (or replace) the transform for `kind`.
    pub fn with(mut self, kind: TagKind, transform: impl Transform + 'static) -> Self {
        self.entries.insert(kind, Box::new(transform));
        self
    }

    pub fn get(&self, kind: TagKind) -> Option<&dyn Transform> {
        self.entries.get(&kind).map(Box::as_ref)
    }

    /// Run the descriptor's sources, resolved against `base`, through its kind's transform.
    ///
    /// Missing sources are dropped silently; if none remain the result is `None`.
    pub fn run(&self, base: &Path, descriptor: &Descriptor) -> Result<Option<String>, TransformError> {
        let transform = self
            .get(descriptor.kind())
            .ok_or(TransformError::Unsupported(descriptor.kind()))?;

        let sources = resolve_sources(base, descriptor.sources());
        if sources.is_empty() {
            return Ok(None);
        }
        transform.apply(&sources, descriptor.is_minimize())
    }
}

impl Default for TransformTable {
    /// lightningcss for stylesheets, oxc for scripts.
    fn default() -> Self {
        Self::empty()
            .with(TagKind::Stylesheet, StylesheetTransform)
            .with(TagKind::Script, ScriptTransform)
    }
}

impl fmt::Debug for TransformTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Join each source onto `base`, keeping only files that exist.
pub fn resolve_sources(base: &Path, sources: &[String]) -> Vec<PathBuf> {
    sources
        .iter()
        .map(|src| base.join(src.trim_start_matches('/')))
        .filter(|path| path.is_file())
        .collect()
}

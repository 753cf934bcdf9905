//! Shared setup for CLI commands.

use anyhow::{Context, Result};

use crate::config::Manifest;
use crate::publish::Publisher;
use crate::transform::TransformTable;

/// Construct a publisher from the manifest and register every bundle.
pub fn open_publisher(manifest: &Manifest) -> Result<Publisher> {
    let mut publisher = Publisher::new(manifest.publish.clone(), TransformTable::default())
        .context("failed to set up publish directories")?;

    for (category, bundle) in manifest.bundles()? {
        publisher
            .register(bundle, &category)
            .with_context(|| format!("failed to register bundle in `{category}`"))?;
    }
    Ok(publisher)
}

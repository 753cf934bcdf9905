//! `reset` command: global cache bust.

use anyhow::{Context, Result};

use crate::config::Manifest;
use crate::log;
use crate::publish::Publisher;
use crate::transform::TransformTable;

/// Move the build baseline to now and delete all cached markup.
///
/// Bundles are not registered: resetting only touches the sentinel and the
/// runtime cache directory.
pub fn reset(manifest: &Manifest) -> Result<()> {
    let mut publisher = Publisher::new(manifest.publish.clone(), TransformTable::empty())
        .context("failed to set up publish directories")?;
    publisher.reset().context("failed to reset build state")?;
    log!("cache"; "reset, new build time {}", publisher.build_time());
    Ok(())
}

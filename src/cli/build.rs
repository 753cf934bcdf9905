//! `build` command: publish categories and print their markup.

use std::io::Write;

use anyhow::{Context, Result};

use super::common::open_publisher;
use crate::config::Manifest;
use crate::{debug, log};

/// Process `categories` (all known ones when empty) and write the markup to `out`.
pub fn build_categories(
    manifest: &Manifest,
    categories: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let mut publisher = open_publisher(manifest)?;

    let categories = if categories.is_empty() {
        publisher.categories().to_vec()
    } else {
        categories.to_vec()
    };

    for category in &categories {
        let markup = publisher
            .process(category)
            .with_context(|| format!("failed to publish `{category}`"))?;
        debug!("publish"; "{}: {} tags", category, markup.lines().count());
        out.write_all(markup.as_bytes())?;
    }
    out.flush()?;

    log!(
        "publish";
        "done ({} categories, build time {})",
        categories.len(),
        publisher.build_time()
    );
    Ok(())
}

//! assetpress - build-time asset publishing.
//!
//! Bundles group markup descriptors (stylesheets, scripts) under a base
//! path. The [`publish::Publisher`] copies, merges and optionally minifies
//! their sources into salted directories under a public root, renders the
//! matching `<link>` / `<script>` tags per category, and caches the markup
//! until the build baseline is reset.
//!
//! # Example
//!
//! ```no_run
//! use assetpress::bundle::StaticBundle;
//! use assetpress::config::PublishOptions;
//! use assetpress::publish::{CATEGORY_TOP, Publisher};
//! use assetpress::tag::Descriptor;
//! use assetpress::transform::TransformTable;
//!
//! let mut publisher = Publisher::new(PublishOptions::default(), TransformTable::default())?;
//! publisher.register(
//!     StaticBundle::new("theme", "vendor/theme")
//!         .with_descriptor(Descriptor::stylesheet(["/css/reset.css", "/css/site.css"]).minimize()),
//!     CATEGORY_TOP,
//! )?;
//! print!("{}", publisher.process(CATEGORY_TOP)?);
//! # Ok::<(), assetpress::publish::PublishError>(())
//! ```

pub mod bundle;
pub mod cli;
pub mod config;
pub mod freshness;
pub mod logger;
pub mod publish;
pub mod tag;
pub mod transform;
pub mod utils;

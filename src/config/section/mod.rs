//! Manifest section definitions.

mod bundle;
mod publish;

pub use bundle::{BundleConfig, TagConfig};
pub use publish::PublishOptions;

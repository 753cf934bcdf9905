//! Publish error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::bundle::BundleKey;
use crate::transform::TransformError;

/// Errors raised by [`Publisher`](super::Publisher).
///
/// Everything except `InvalidCategory` and `Setup` aborts a `process()` call
/// midway; files already written stay on disk.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("invalid category name `{0}`: only word characters, `.`, `-` and `_` are allowed")]
    InvalidCategory(String),

    #[error("failed to set up `{0}`")]
    Setup(PathBuf, #[source] std::io::Error),

    #[error("category not found: `{0}`")]
    UnknownCategory(String),

    #[error("failed to create bundle directory `{0}`")]
    DirectoryCreate(PathBuf, #[source] std::io::Error),

    #[error("failed to write published file `{0}`")]
    PublishWrite(PathBuf, #[source] std::io::Error),

    #[error("failed to persist build `{0}`")]
    BuildPersist(PathBuf, #[source] std::io::Error),

    #[error("bundle `{bundle}` dist path not found: `{path}`")]
    DistPathNotFound { bundle: BundleKey, path: PathBuf },

    #[error("failed to mirror `{0}`")]
    Mirror(PathBuf, #[source] std::io::Error),

    #[error("bundle `{bundle}`: transform failed")]
    Transform {
        bundle: BundleKey,
        #[source]
        source: TransformError,
    },
}

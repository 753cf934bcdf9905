//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_path` - resolve manifest paths against the manifest directory
//! - `url_path` - turn a relative file system path into a URL path
//! - `create_dir_all` - recursive directory creation with a permission mode

use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
///
/// # Example
/// ```ignore
/// use assetpress::utils::path::normalize_path;
/// let abs = normalize_path(Path::new("./resources/app"));
/// ```
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a manifest path against the manifest's directory.
///
/// `~` is expanded first. Absolute paths are kept as-is; relative paths are
/// joined onto `base_dir`. The result is not required to exist.
///
/// # Example
/// ```ignore
/// use assetpress::utils::path::resolve_path;
/// let public = resolve_path("~/site/public", manifest_dir);
/// ```
pub fn resolve_path(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(path).as_ref());
    if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    }
}

/// Render a relative path as a URL path: `/`-separated, leading `/`.
///
/// `.` components are dropped; everything else is kept verbatim.
pub fn url_path(relative: &Path) -> String {
    let mut url = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                url.push('/');
                url.push_str(&part.to_string_lossy());
            }
            Component::ParentDir => url.push_str("/.."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    if url.is_empty() {
        url.push('/');
    }
    url
}

/// Recursively create `path`, applying `mode` to new directories on unix.
pub fn create_dir_all(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)
}

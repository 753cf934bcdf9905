//! Auxiliary distribution mirroring.
//!
//! Dist paths (fonts, images, source maps, ...) are mirrored verbatim into
//! the bundle's output directory, keeping their position relative to the
//! bundle's base path:
//!
//! ```text
//! <base>/vendor/fonts/a.woff2  →  <public>/<salt>/vendor/fonts/a.woff2
//! ```
//!
//! Files are symlinked to their canonical source, or copied when symlinks
//! are disabled. Existing destinations are left alone, which makes reruns
//! cheap and keeps transformed files from being replaced by raw sources.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::PublishError;
use crate::debug;
use crate::utils::path::create_dir_all;

/// How dist files are materialized.
#[derive(Debug, Clone, Copy)]
pub struct MirrorOptions {
    pub symlink: bool,
    pub dir_mode: u32,
}

/// Mirror one dist root (file or directory) into `bundle_dir`.
///
/// `base` is the bundle's base path; destinations keep the path relative to it.
/// Returns the number of entries created.
pub fn mirror(
    dist_root: &Path,
    base: &Path,
    bundle_dir: &Path,
    options: MirrorOptions,
) -> Result<usize, PublishError> {
    let mut created = 0;

    if dist_root.is_file() {
        let dest = destination(dist_root, base, bundle_dir);
        if mirror_file(dist_root, &dest, options)? {
            created += 1;
        }
        return Ok(created);
    }

    for entry in WalkDir::new(dist_root).skip_hidden(false).sort(true) {
        let entry = entry.map_err(|err| {
            PublishError::Mirror(dist_root.to_path_buf(), io::Error::other(err.to_string()))
        })?;
        if entry.depth == 0 {
            continue;
        }

        let path = entry.path();
        let dest = destination(&path, base, bundle_dir);

        if entry.file_type().is_dir() {
            if !exists(&dest) {
                create_dir_all(&dest, options.dir_mode)
                    .map_err(|err| PublishError::DirectoryCreate(dest.clone(), err))?;
                created += 1;
            }
        } else if mirror_file(&path, &dest, options)? {
            created += 1;
        }
    }

    Ok(created)
}

/// Mirror a single file. Returns `false` if `dest` already existed.
fn mirror_file(src: &Path, dest: &Path, options: MirrorOptions) -> Result<bool, PublishError> {
    if exists(dest) {
        return Ok(false);
    }

    if let Some(parent) = dest.parent()
        && !parent.exists()
    {
        create_dir_all(parent, options.dir_mode)
            .map_err(|err| PublishError::DirectoryCreate(parent.to_path_buf(), err))?;
    }

    let target = src
        .canonicalize()
        .map_err(|err| PublishError::Mirror(src.to_path_buf(), err))?;

    if options.symlink {
        link(&target, dest)
    } else {
        fs::copy(&target, dest).map(|_| ())
    }
    .map_err(|err| PublishError::Mirror(dest.to_path_buf(), err))?;

    debug!("dist"; "{} → {}", target.display(), dest.display());
    Ok(true)
}

/// Destination of `path` inside `bundle_dir`, relative to `base`.
///
/// Paths outside `base` keep only their file name.
fn destination(path: &Path, base: &Path, bundle_dir: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(relative) => bundle_dir.join(relative),
        Err(_) => bundle_dir.join(path.file_name().unwrap_or(path.as_os_str())),
    }
}

/// Like `Path::exists`, but true for dangling symlinks too.
fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

#[cfg(unix)]
fn link(target: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, dest)
}

#[cfg(not(unix))]
fn link(target: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(target, dest).map(|_| ())
}

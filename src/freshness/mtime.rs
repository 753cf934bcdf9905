//! Mtime-based freshness detection.
//!
//! All comparisons are done in whole unix seconds: the build-time baseline
//! is stored as the sentinel file's mtime, and sub-second precision is not
//! preserved by every filesystem.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Modification time of a file in unix seconds.
pub fn mtime_secs(path: &Path) -> Option<i64> {
    get_mtime(path).map(to_secs)
}

/// Check if a file was modified after `baseline` (unix seconds).
///
/// Returns `false` if the file doesn't exist or its mtime can't be read.
pub fn is_newer_than_secs(path: &Path, baseline: i64) -> bool {
    mtime_secs(path).is_some_and(|secs| secs > baseline)
}

/// Set the modification time of an existing file to `secs` (unix seconds).
pub fn set_mtime_secs(path: &Path, secs: i64) -> io::Result<()> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_modified(from_secs(secs))
}

/// Create `path` as an empty file if it does not exist yet.
pub fn touch(path: &Path) -> io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path).map(|_: File| ())
}

/// Current time in unix seconds.
pub fn now_secs() -> i64 {
    to_secs(SystemTime::now())
}

fn to_secs(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => -i64::try_from(e.duration().as_secs()).unwrap_or(i64::MAX),
    }
}

fn from_secs(secs: i64) -> SystemTime {
    let magnitude = Duration::from_secs(secs.unsigned_abs());
    if secs >= 0 {
        UNIX_EPOCH + magnitude
    } else {
        UNIX_EPOCH - magnitude
    }
}

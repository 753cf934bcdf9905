//! Freshness detection: mtime comparisons against the build-time baseline.

pub mod mtime;

pub use mtime::{get_mtime, is_newer_than_secs, mtime_secs, now_secs, set_mtime_secs, touch};

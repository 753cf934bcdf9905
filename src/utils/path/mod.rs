//! Path utilities.

mod fs;

pub use fs::{create_dir_all, normalize_path, resolve_path, url_path};

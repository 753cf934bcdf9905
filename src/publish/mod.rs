//! Publish orchestrator.
//!
//! Owns the bundle registry, the public output root and the markup cache,
//! and turns a category of bundles into rendered markup:
//!
//! ```text
//! process(category)
//!   ├─ cache hit (lock_build) → cached markup, nothing else touched
//!   └─ for each bundle (registration order)
//!        ├─ dependencies first (depth-first, each bundle once per call)
//!        ├─ descriptors → transform if stale → write → render tag
//!        └─ dist paths → mirror
//!      persist markup, restore sentinel mtime
//! ```
//!
//! # Filesystem layout
//!
//! ```text
//! <public>/<build_file>              sentinel, mtime = build-time baseline
//! <public>/<salt>/...                published bundle files
//! <runtime>/<runtime_dir>/<category> cached markup per category
//! ```

mod dist;
mod error;
mod salt;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::bundle::{Bundle, BundleKey};
use crate::config::PublishOptions;
use crate::freshness::{is_newer_than_secs, mtime_secs, now_secs, set_mtime_secs, touch};
use crate::tag::Descriptor;
use crate::transform::TransformTable;
use crate::utils::path::{create_dir_all, url_path};
use crate::{debug, log};

pub use dist::MirrorOptions;
pub use error::PublishError;
pub use salt::{SALT_LEN, bundle_salt, published_path};

pub const CATEGORY_TOP: &str = "top";
pub const CATEGORY_BOTTOM: &str = "bottom";
pub const CATEGORY_COMMON: &str = "common";

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.-]+$").unwrap());

/// Check a category name against `^[\w.-]+$`.
pub fn is_valid_category(name: &str) -> bool {
    CATEGORY_RE.is_match(name)
}

/// Strip scheme and trailing slashes from a configured host.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    host.strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host)
        .to_string()
}

/// Normalize a URL prefix to `""` or `/segment[/segment..]`.
fn normalize_prefix(prefix: &str) -> String {
    match prefix.trim_matches('/') {
        "" => String::new(),
        trimmed => format!("/{trimmed}"),
    }
}

struct Registered {
    category: String,
    key: BundleKey,
    bundle: Arc<dyn Bundle>,
}

/// Bundle registry plus the publish/cache algorithm.
pub struct Publisher {
    host: String,
    url_prefix: String,
    public_path: PathBuf,
    runtime_dir: PathBuf,
    build_file: PathBuf,
    lock_build: bool,
    mirror: MirrorOptions,
    build_time: i64,
    transforms: TransformTable,
    categories: Vec<String>,
    bundles: Vec<Registered>,
    output_dirs: FxHashMap<BundleKey, PathBuf>,
}

impl Publisher {
    /// Create the runtime and public directories and the sentinel file if
    /// needed, and read the build-time baseline from the sentinel.
    pub fn new(options: PublishOptions, transforms: TransformTable) -> Result<Self, PublishError> {
        let runtime_dir = options.runtime_path.join(&options.runtime_dir);
        let build_file = options.public_path.join(options.build_file.trim_matches('/'));

        create_dir_all(&runtime_dir, options.dir_mode)
            .map_err(|err| PublishError::Setup(runtime_dir.clone(), err))?;
        create_dir_all(&options.public_path, options.dir_mode)
            .map_err(|err| PublishError::Setup(options.public_path.clone(), err))?;
        touch(&build_file).map_err(|err| PublishError::Setup(build_file.clone(), err))?;

        let build_time = mtime_secs(&build_file).ok_or_else(|| {
            PublishError::Setup(
                build_file.clone(),
                io::Error::other("cannot read build file mtime"),
            )
        })?;

        debug!("publish"; "build time {} from {}", build_time, build_file.display());

        Ok(Self {
            host: normalize_host(&options.host),
            url_prefix: normalize_prefix(&options.url_prefix),
            public_path: options.public_path,
            runtime_dir,
            build_file,
            lock_build: options.lock_build,
            mirror: MirrorOptions {
                symlink: options.symlink,
                dir_mode: options.dir_mode,
            },
            build_time,
            transforms,
            categories: vec![CATEGORY_COMMON.to_string()],
            bundles: Vec::new(),
            output_dirs: FxHashMap::default(),
        })
    }

    /// Build-time baseline (sentinel mtime, unix seconds).
    pub const fn build_time(&self) -> i64 {
        self.build_time
    }

    /// Normalized host used for absolute URLs.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Known categories in first-registration order (`common` is always present).
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Location of the cached markup for `category`.
    pub fn cache_file(&self, category: &str) -> PathBuf {
        self.runtime_dir.join(category)
    }

    /// Register a bundle under `category`. Registration order is render order.
    pub fn register<B: Bundle + 'static>(
        &mut self,
        bundle: B,
        category: &str,
    ) -> Result<(), PublishError> {
        self.register_shared(Arc::new(bundle), category)
    }

    /// Register an already shared bundle under `category`.
    pub fn register_shared(
        &mut self,
        bundle: Arc<dyn Bundle>,
        category: &str,
    ) -> Result<(), PublishError> {
        if !is_valid_category(category) {
            return Err(PublishError::InvalidCategory(category.to_string()));
        }
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
        self.bundles.push(Registered {
            category: category.to_string(),
            key: bundle.key(),
            bundle,
        });
        Ok(())
    }

    /// Output directory of a bundle: `<public>/<salt>`. Memoized per key.
    pub fn bundle_output_dir(&mut self, key: &BundleKey) -> PathBuf {
        let (public, build_time) = (&self.public_path, self.build_time);
        self.output_dirs
            .entry(key.clone())
            .or_insert_with(|| public.join(bundle_salt(key, build_time)))
            .clone()
    }

    /// Publish every bundle of `category` and return the rendered markup.
    ///
    /// With `lock_build`, a previously persisted markup file is returned
    /// verbatim and no bundle is consulted.
    pub fn process(&mut self, category: &str) -> Result<String, PublishError> {
        if self.bundles.is_empty() {
            return Ok(String::new());
        }
        if !self.categories.iter().any(|c| c == category) {
            return Err(PublishError::UnknownCategory(category.to_string()));
        }

        let cache_file = self.cache_file(category);
        if self.lock_build
            && cache_file.is_file()
            && let Ok(markup) = fs::read_to_string(&cache_file)
        {
            debug!("cache"; "hit: {}", category);
            return Ok(markup);
        }

        let mut markup = String::new();
        let mut visited = FxHashSet::default();
        let members: Vec<usize> = (0..self.bundles.len())
            .filter(|&i| self.bundles[i].category == category)
            .collect();

        for idx in members {
            self.visit(idx, &mut visited, &mut Vec::new(), &mut markup)?;
        }

        if self.lock_build && !markup.is_empty() {
            fs::write(&cache_file, &markup)
                .map_err(|err| PublishError::BuildPersist(cache_file.clone(), err))?;
            debug!("cache"; "stored: {}", cache_file.display());
        }

        set_mtime_secs(&self.build_file, self.build_time)
            .map_err(|err| PublishError::BuildPersist(self.build_file.clone(), err))?;

        Ok(markup)
    }

    /// Move the baseline to now and drop all cached markup.
    ///
    /// Every bundle gets a new salt, so the next `process()` republishes
    /// everything into fresh directories.
    pub fn reset(&mut self) -> Result<(), PublishError> {
        let now = now_secs();
        set_mtime_secs(&self.build_file, now)
            .map_err(|err| PublishError::BuildPersist(self.build_file.clone(), err))?;
        self.build_time = now;
        self.output_dirs.clear();

        let entries = fs::read_dir(&self.runtime_dir)
            .map_err(|err| PublishError::BuildPersist(self.runtime_dir.clone(), err))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() {
                fs::remove_file(&path).map_err(|err| PublishError::BuildPersist(path, err))?;
            }
        }
        Ok(())
    }

    /// Depth-first publish of one bundle and its dependencies.
    ///
    /// A bundle already in `visited` is skipped, which is also what ends a
    /// dependency cycle; `stack` only serves to report the cycle.
    fn visit(
        &mut self,
        idx: usize,
        visited: &mut FxHashSet<BundleKey>,
        stack: &mut Vec<BundleKey>,
        markup: &mut String,
    ) -> Result<(), PublishError> {
        let key = self.bundles[idx].key.clone();
        if !visited.insert(key.clone()) {
            return Ok(());
        }
        let bundle = Arc::clone(&self.bundles[idx].bundle);

        let dependencies = bundle.dependencies();
        if !dependencies.is_empty() {
            stack.push(key.clone());
            for dep in &dependencies {
                if stack.contains(dep) {
                    log!("warning"; "dependency cycle: `{}` → `{}`", key, dep);
                } else if !self.bundles.iter().any(|r| r.key == *dep) {
                    log!("warning"; "bundle `{}` depends on unregistered `{}`", key, dep);
                }
            }
            for dep_idx in 0..self.bundles.len() {
                if dependencies.contains(&self.bundles[dep_idx].key) {
                    self.visit(dep_idx, visited, stack, markup)?;
                }
            }
            stack.pop();
        }

        self.publish_bundle(&key, bundle.as_ref(), markup)
    }

    fn publish_bundle(
        &mut self,
        key: &BundleKey,
        bundle: &dyn Bundle,
        markup: &mut String,
    ) -> Result<(), PublishError> {
        let source_root = bundle.source_root();

        for descriptor in bundle.descriptors() {
            if let Some(url) = self.publish_descriptor(key, bundle, &source_root, &descriptor)? {
                markup.push_str(&descriptor.render(&url));
                markup.push('\n');
            }
        }

        for dist in bundle.dist_paths() {
            let root = source_root.join(&dist);
            if !root.exists() {
                return Err(PublishError::DistPathNotFound {
                    bundle: key.clone(),
                    path: root,
                });
            }
            let dir = self.ensure_bundle_dir(key)?;
            let created = dist::mirror(&root, bundle.base_path(), &dir, self.mirror)?;
            debug!("dist"; "{}: {} new entries from {}", key, created, root.display());
        }

        Ok(())
    }

    /// Publish one descriptor and return the URL to render, or `None` when
    /// there is nothing to reference.
    fn publish_descriptor(
        &mut self,
        key: &BundleKey,
        bundle: &dyn Bundle,
        source_root: &Path,
        descriptor: &Descriptor,
    ) -> Result<Option<String>, PublishError> {
        if descriptor.sources().is_empty() {
            debug!("publish"; "{}: descriptor without sources skipped", key);
            return Ok(None);
        }

        let url = if descriptor.is_remote() {
            descriptor.primary().to_string()
        } else {
            let dir = self.ensure_bundle_dir(key)?;
            let target = published_path(&dir, bundle.name(), descriptor.primary());

            if let Some(parent) = target.parent()
                && !parent.is_dir()
            {
                create_dir_all(parent, self.mirror.dir_mode)
                    .map_err(|err| PublishError::DirectoryCreate(parent.to_path_buf(), err))?;
            }

            if !target.exists() || is_newer_than_secs(&target, self.build_time) {
                let transformed = self
                    .transforms
                    .run(source_root, descriptor)
                    .map_err(|source| PublishError::Transform {
                        bundle: key.clone(),
                        source,
                    })?;
                let Some(content) = transformed else {
                    debug!("publish"; "{}: no sources found for `{}`", key, descriptor.primary());
                    return Ok(None);
                };
                fs::write(&target, content)
                    .map_err(|err| PublishError::PublishWrite(target.clone(), err))?;
                debug!("publish"; "{}", target.display());
            }

            self.public_url(&target, descriptor.is_relative())
        };

        Ok(Some(if descriptor.is_with_timestamp() {
            format!("{url}?ts={}", now_secs())
        } else {
            url
        }))
    }

    /// Bundle output directory, created on first use.
    fn ensure_bundle_dir(&mut self, key: &BundleKey) -> Result<PathBuf, PublishError> {
        let dir = self.bundle_output_dir(key);
        if !dir.is_dir() {
            create_dir_all(&dir, self.mirror.dir_mode)
                .map_err(|err| PublishError::DirectoryCreate(dir.clone(), err))?;
        }
        Ok(dir)
    }

    /// URL of a published file: `[//host][prefix]/<path under public root>`.
    fn public_url(&self, target: &Path, relative: bool) -> String {
        let rel = target.strip_prefix(&self.public_path).unwrap_or(target);
        let path = format!("{}{}", self.url_prefix, url_path(rel));
        if relative {
            path
        } else {
            format!("//{}{}", self.host, path)
        }
    }
}

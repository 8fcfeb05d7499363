//! A process-wide default [`Templates`] instance.
//!
//! Convenience for applications that keep one template tree for their
//! whole lifetime. Everything here forwards to the explicit API under a
//! read-write lock: renders share the lock, `build` and the setters take it
//! exclusively.
//!
//! ```rust,no_run
//! use tmplgroups::{global, BufferSink};
//!
//! global::configure_on_disk("templates", ["app", "docs"]);
//! global::set_development(true)?;
//! global::build()?;
//!
//! let mut sink = BufferSink::new();
//! global::render(&mut sink, "app", "index", ())?;
//! # Ok::<(), tmplgroups::error::Error>(())
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use crate::renderer::HelperFunctions;
use crate::sink::OutputSink;
use crate::templates::Templates;
use include_dir::Dir;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

static DEFAULT: Lazy<RwLock<Templates>> = Lazy::new(|| RwLock::new(Templates::default()));

fn read() -> Result<RwLockReadGuard<'static, Templates>> {
    DEFAULT
        .read()
        .map_err(|_| Error::Other(anyhow::anyhow!("default templates lock is poisoned")))
}

fn write() -> Result<RwLockWriteGuard<'static, Templates>> {
    DEFAULT
        .write()
        .map_err(|_| Error::Other(anyhow::anyhow!("default templates lock is poisoned")))
}

fn replace(config: Config) {
    // A poisoned lock still holds a usable value; a new config replaces it anyway.
    let mut guard = DEFAULT.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Templates::new(config);
}

/// Replaces the default instance with one wrapping `config`.
pub fn configure(config: Config) {
    replace(config);
}

/// Configures the default instance for on-disk templates with the bundled
/// helper functions.
pub fn configure_on_disk<P, I, S>(base_path: P, sub_dirs: I)
where
    P: Into<PathBuf>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    replace(Config::on_disk(base_path, sub_dirs).with_helpers(HelperFunctions::defaults()));
}

/// Configures the default instance for embedded templates with the bundled
/// helper functions.
pub fn configure_embedded<P, I, S>(bundle: &'static Dir<'static>, base_path: P, sub_dirs: I)
where
    P: Into<PathBuf>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    replace(
        Config::embedded(bundle, base_path, sub_dirs).with_helpers(HelperFunctions::defaults()),
    );
}

/// Builds the default instance. See [`Templates::build`].
pub fn build() -> Result<()> {
    write()?.build()
}

/// Renders through the default instance. See [`Templates::render`].
pub fn render<S, D>(sink: &mut S, group: &str, template: &str, data: D) -> Result<()>
where
    S: OutputSink + ?Sized,
    D: Serialize,
{
    read()?.render(sink, group, template, data)
}

pub fn set_development(development: bool) -> Result<()> {
    write()?.config_mut().development = development;
    Ok(())
}

pub fn set_use_local_files(use_local_files: bool) -> Result<()> {
    write()?.config_mut().use_local_files = use_local_files;
    Ok(())
}

pub fn set_cache_busting_file_pairs(pairs: IndexMap<String, String>) -> Result<()> {
    write()?.config_mut().cache_busting_file_pairs = pairs;
    Ok(())
}

/// Runs `f` with read access to the default instance's config.
pub fn with_config<T>(f: impl FnOnce(&Config) -> T) -> Result<T> {
    Ok(f(read()?.config()))
}

//! Template source discovery.
//!
//! A [`TemplateLoader`] abstracts "list a directory" and "join a path" over
//! the two places template sources can live: the local filesystem and a
//! bundle embedded in the executable. [`discover`] builds on it to find the
//! template files of one directory.

use crate::config::{Config, TemplateSource};
use crate::error::Result;
use crate::ext::StrExt;
use log::debug;
use std::path::{Path, PathBuf};

pub mod embedded;
pub mod interface;
pub mod local;

pub use embedded::EmbeddedLoader;
pub use interface::{DirEntry, TemplateLoader};
pub use local::LocalLoader;

/// Returns the loader matching a configured template source.
pub fn get_loader(source: &TemplateSource) -> Box<dyn TemplateLoader + Send + Sync> {
    match source {
        TemplateSource::FileSystem => Box::new(LocalLoader::new()),
        TemplateSource::Embedded(bundle) => Box::new(EmbeddedLoader::new(*bundle)),
    }
}

/// Lists the template files directly inside `dir`.
///
/// Only files whose last extension is exactly `extension` are returned
/// (`report.html.bak` is not an `html` file). Subdirectories are skipped,
/// not descended into. Each result is `dir` joined with the file name, as
/// spelled by the loader.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Matching paths in name order; empty when the
///   directory holds no template files
pub fn discover(
    loader: &dyn TemplateLoader,
    dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>> {
    let dir = loader.normalize(dir);
    let paths: Vec<PathBuf> = loader
        .read_dir(&dir)?
        .into_iter()
        .filter(|entry| !entry.is_dir)
        .filter(|entry| entry.name.file_extension() == Some(extension))
        .map(|entry| loader.join(&dir, &entry.name))
        .collect();

    debug!("Found {} template file(s) in '{}'.", paths.len(), dir.display());
    Ok(paths)
}

/// Recursively lists every file of the configured source under its base
/// path, for checking what a build will actually see (embedded bundles in
/// particular).
pub fn list_source_files(config: &Config) -> Result<Vec<PathBuf>> {
    let loader = get_loader(&config.source);
    loader.file_list(&loader.normalize(&config.base_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;

    #[test]
    fn discover_filters_on_exact_extension() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("index.html"), "").unwrap();
        fs::write(tmp.path().join("report.html.bak"), "").unwrap();
        fs::write(tmp.path().join("html"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let paths = discover(&LocalLoader::new(), tmp.path(), "html").unwrap();
        assert_eq!(paths, vec![tmp.path().join("index.html")]);
    }

    #[test]
    fn discover_does_not_recurse() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("nested.html")).unwrap();
        fs::write(tmp.path().join("nested.html").join("inner.html"), "").unwrap();

        let paths = discover(&LocalLoader::new(), tmp.path(), "html").unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn discover_with_custom_extension() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("page.tmpl"), "").unwrap();
        fs::write(tmp.path().join("page.html"), "").unwrap();

        let paths = discover(&LocalLoader::new(), tmp.path(), "tmpl").unwrap();
        assert_eq!(paths, vec![tmp.path().join("page.tmpl")]);
    }

    #[test]
    fn discover_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover(&LocalLoader::new(), &tmp.path().join("gone"), "html").unwrap_err();
        assert!(matches!(err, Error::Discovery { .. }));
    }
}

use crate::error::{Error, Result};
use crate::loader::interface::{DirEntry, TemplateLoader};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Loader for templates from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalLoader;

impl LocalLoader {
    /// Creates a new LocalLoader instance.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateLoader for LocalLoader {
    fn read_dir(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        debug!("Listing '{}'.", dir.display());
        let discovery_error = |e: std::io::Error| Error::Discovery {
            path: dir.display().to_string(),
            reason: e.to_string(),
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(discovery_error)? {
            let entry = entry.map_err(discovery_error)?;
            let is_dir = entry.file_type().map_err(discovery_error)?.is_dir();
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(DirEntry { name, is_dir });
        }
        // fs::read_dir order is platform dependent
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn normalize(&self, dir: &Path) -> PathBuf {
        dir.to_path_buf()
    }

    fn join(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(name)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(Error::IoError)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn file_list(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Discovery {
                path: root.display().to_string(),
                reason: e.to_string(),
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn read_dir_reports_files_and_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.html"), "b").unwrap();
        fs::write(tmp.path().join("a.html"), "a").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();

        let entries = LocalLoader::new().read_dir(tmp.path()).unwrap();
        assert_eq!(
            entries,
            vec![DirEntry::file("a.html"), DirEntry::file("b.html"), DirEntry::dir("nested")]
        );
    }

    #[test]
    fn read_dir_of_missing_directory_is_a_discovery_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = LocalLoader::new().read_dir(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::Discovery { .. }));
    }

    #[test]
    fn file_list_recurses() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("app")).unwrap();
        fs::write(tmp.path().join("header.html"), "").unwrap();
        fs::write(tmp.path().join("app").join("index.html"), "").unwrap();

        let files = LocalLoader::new().file_list(tmp.path()).unwrap();
        assert_eq!(
            files,
            vec![tmp.path().join("app").join("index.html"), tmp.path().join("header.html")]
        );
    }
}

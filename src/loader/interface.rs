use crate::error::Result;
use std::path::{Path, PathBuf};

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File or directory name, without any parent components
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dir: false }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dir: true }
    }
}

/// Trait for reading template sources from different backing stores.
///
/// Implementations decide how paths are spelled: the on-disk loader uses
/// native separators, the embedded loader forward slashes only.
pub trait TemplateLoader {
    /// Lists the immediate entries of `dir`, without recursing.
    ///
    /// # Errors
    /// * `Error::Discovery` if the directory cannot be listed
    fn read_dir(&self, dir: &Path) -> Result<Vec<DirEntry>>;

    /// Normalizes a directory path into the form this loader addresses.
    fn normalize(&self, dir: &Path) -> PathBuf;

    /// Joins a directory and an entry name into a full path.
    fn join(&self, dir: &Path, name: &str) -> PathBuf;

    /// Reads a template source file.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Whether `path` names an existing file or directory.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively lists every file below `root`.
    fn file_list(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

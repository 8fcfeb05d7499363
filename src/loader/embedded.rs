use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::loader::interface::{DirEntry, TemplateLoader};
use include_dir::Dir;
use log::debug;
use std::io;
use std::path::{Path, PathBuf};

/// Loader for templates baked into the executable with `include_dir!`.
///
/// Paths are relative to the bundle root and always use `/`, whatever the
/// host platform. `""` and `"."` both address the root itself.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedLoader {
    bundle: &'static Dir<'static>,
}

impl EmbeddedLoader {
    /// Creates a new EmbeddedLoader over `bundle`.
    pub fn new(bundle: &'static Dir<'static>) -> Self {
        Self { bundle }
    }

    fn normalized(path: &Path) -> String {
        let mut path = path.to_slash();
        while let Some(rest) = path.strip_prefix("./") {
            path = rest.to_string();
        }
        let path = path.trim_end_matches('/');
        if path == "." {
            String::new()
        } else {
            path.to_string()
        }
    }

    fn lookup_dir(&self, dir: &Path) -> Option<&'static Dir<'static>> {
        let dir = Self::normalized(dir);
        if dir.is_empty() {
            Some(self.bundle)
        } else {
            self.bundle.get_dir(dir)
        }
    }

    fn collect_files(dir: &'static Dir<'static>, files: &mut Vec<PathBuf>) {
        for entry in dir.entries() {
            match entry {
                include_dir::DirEntry::Dir(d) => Self::collect_files(d, files),
                include_dir::DirEntry::File(f) => {
                    files.push(PathBuf::from(f.path().to_slash()))
                }
            }
        }
    }
}

impl TemplateLoader for EmbeddedLoader {
    fn read_dir(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        debug!("Listing embedded '{}'.", dir.to_slash());
        let found = self.lookup_dir(dir).ok_or_else(|| Error::Discovery {
            path: dir.to_slash(),
            reason: "no such directory in the embedded files".to_string(),
        })?;

        let mut entries: Vec<DirEntry> = found
            .entries()
            .iter()
            .filter_map(|entry| {
                let name = entry.path().file_name()?.to_string_lossy().into_owned();
                let is_dir = matches!(entry, include_dir::DirEntry::Dir(_));
                Some(DirEntry { name, is_dir })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn normalize(&self, dir: &Path) -> PathBuf {
        PathBuf::from(Self::normalized(dir))
    }

    fn join(&self, dir: &Path, name: &str) -> PathBuf {
        let dir = Self::normalized(dir);
        let name = name.replace('\\', "/");
        if dir.is_empty() {
            PathBuf::from(name)
        } else {
            PathBuf::from(format!("{dir}/{name}"))
        }
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = Self::normalized(path);
        let file = self.bundle.get_file(&path).ok_or_else(|| {
            Error::IoError(io::Error::new(
                io::ErrorKind::NotFound,
                format!("embedded file '{path}' not found"),
            ))
        })?;
        let content = file.contents_utf8().ok_or_else(|| {
            Error::IoError(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("embedded file '{path}' is not valid UTF-8"),
            ))
        })?;
        Ok(content.to_string())
    }

    fn exists(&self, path: &Path) -> bool {
        let path = Self::normalized(path);
        path.is_empty() || self.bundle.get_entry(&path).is_some()
    }

    fn file_list(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let dir = self.lookup_dir(root).ok_or_else(|| Error::Discovery {
            path: root.to_slash(),
            reason: "no such directory in the embedded files".to_string(),
        })?;
        let mut files = Vec::new();
        Self::collect_files(dir, &mut files);
        files.sort();
        Ok(files)
    }
}

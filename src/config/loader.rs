//! Configuration construction, validation and loading

use crate::config::types::{get_default_extension, TemplateSource};
use crate::constants::{DEFAULT_EXTENSION, JSON_CONFIG_EXTENSIONS, YAML_CONFIG_EXTENSIONS};
use crate::error::{Error, Result};
use crate::ext::StrExt;
use crate::loader::get_loader;
use crate::renderer::HelperFunctions;
use include_dir::Dir;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Settings for discovering, compiling and rendering a template tree.
///
/// Files directly under `base_path` are shared: they are compiled into a
/// group of their own (key `""`) and appended to every subdirectory group.
/// Each entry of `sub_dirs` is a directory name under `base_path`, not a
/// full path.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the shared templates and the subdirectories
    pub base_path: PathBuf,
    /// Subdirectory names, compiled into one group each
    pub sub_dirs: Vec<String>,
    /// File extension of template files, without the leading dot
    pub extension: String,
    pub source: TemplateSource,
    /// Functions attached to every compiled group
    pub helpers: HelperFunctions,
    /// Original asset name to cache-busted asset name, passed to templates as-is
    pub cache_busting_file_pairs: IndexMap<String, String>,
    /// Passed to templates; typically toggles diagnostics and un-busted assets
    pub development: bool,
    /// Passed to templates; selects locally hosted third-party assets
    pub use_local_files: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a config with only the defaults set.
    pub fn new() -> Self {
        Self {
            base_path: PathBuf::new(),
            sub_dirs: Vec::new(),
            extension: get_default_extension(),
            source: TemplateSource::FileSystem,
            helpers: HelperFunctions::new(),
            cache_busting_file_pairs: IndexMap::new(),
            development: false,
            use_local_files: false,
        }
    }

    /// Creates a config for templates stored on the local filesystem.
    pub fn on_disk<P, I, S>(base_path: P, sub_dirs: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_path: base_path.into(),
            sub_dirs: sub_dirs.into_iter().map(Into::into).collect(),
            ..Self::new()
        }
    }

    /// Creates a config for templates embedded in the executable.
    ///
    /// `base_path` is relative to the root of `bundle` and uses `/`.
    pub fn embedded<P, I, S>(bundle: &'static Dir<'static>, base_path: P, sub_dirs: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: TemplateSource::Embedded(bundle),
            ..Self::on_disk(base_path, sub_dirs)
        }
    }

    pub fn with_helpers(mut self, helpers: HelperFunctions) -> Self {
        self.helpers = helpers;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_cache_busting_file_pairs(mut self, pairs: IndexMap<String, String>) -> Self {
        self.cache_busting_file_pairs = pairs;
        self
    }

    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    pub fn with_use_local_files(mut self, use_local_files: bool) -> Self {
        self.use_local_files = use_local_files;
        self
    }

    /// Checks the config and normalizes it in place.
    ///
    /// Rules are checked in order and the first failure is returned:
    /// base path set, base path exists (filesystem only), every
    /// subdirectory named and present (filesystem only), extension
    /// defaulted, embedded bundle non-empty (embedded only).
    ///
    /// # Errors
    /// * `Error::BasePathMissing` if the base path is blank
    /// * `Error::PathNotFound` if the base path or a subdirectory is missing
    /// * `Error::InvalidSubdirectory` if a subdirectory name is blank
    /// * `Error::NoEmbeddedSource` if the embedded bundle has no entries
    pub fn validate(&mut self) -> Result<()> {
        if let Some(base) = self.base_path.to_str() {
            self.base_path = PathBuf::from(base.trim());
        }
        if self.base_path.as_os_str().is_empty() {
            return Err(Error::BasePathMissing);
        }

        // Embedded bundles are trusted to hold the layout they were built with.
        if !self.source.is_embedded() {
            let loader = get_loader(&self.source);
            if !loader.exists(&self.base_path) {
                return Err(Error::PathNotFound {
                    path: self.base_path.display().to_string(),
                });
            }

            for sub_dir in self.sub_dirs.iter_mut() {
                if sub_dir.is_blank() {
                    return Err(Error::InvalidSubdirectory);
                }
                let native = from_slash(sub_dir.trim());
                let full_path = loader.join(&self.base_path, &native);
                if !loader.exists(&full_path) {
                    return Err(Error::PathNotFound {
                        path: full_path.display().to_string(),
                    });
                }
                *sub_dir = native;
            }
        }

        let extension = self.extension.trim().trim_start_matches('.');
        self.extension = if extension.is_empty() {
            DEFAULT_EXTENSION.to_string()
        } else {
            extension.to_string()
        };

        if let TemplateSource::Embedded(bundle) = self.source {
            if bundle.entries().is_empty() {
                return Err(Error::NoEmbeddedSource);
            }
        }

        debug!(
            "Validated config: {} subdirectories under '{}' from {}.",
            self.sub_dirs.len(),
            self.base_path.display(),
            self.source
        );
        Ok(())
    }
}

fn from_slash(path: &str) -> String {
    path.replace('/', &MAIN_SEPARATOR.to_string())
}

/// On-disk configuration as stored in a JSON or YAML file.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub base_path: Option<PathBuf>,
    pub sub_dirs: Vec<String>,
    pub extension: Option<String>,
    pub development: bool,
    pub use_local_files: bool,
    pub cache_busting_file_pairs: IndexMap<String, String>,
}

impl ConfigFile {
    /// Reads a config file, choosing the format from its extension.
    ///
    /// # Errors
    /// * `Error::ConfigParse` if the extension is not `json`, `yaml` or `yml`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .to_string_lossy()
            .file_extension()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let content = std::fs::read_to_string(path)?;
        if JSON_CONFIG_EXTENSIONS.contains(&extension.as_str()) {
            Ok(serde_json::from_str(&content)?)
        } else if YAML_CONFIG_EXTENSIONS.contains(&extension.as_str()) {
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Err(Error::ConfigParse(format!(
                "unsupported config file '{}', expected one of: {}",
                path.display(),
                JSON_CONFIG_EXTENSIONS
                    .iter()
                    .chain(YAML_CONFIG_EXTENSIONS)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ")
            )))
        }
    }

    /// Turns the file contents into an on-disk [`Config`].
    pub fn into_config(self) -> Config {
        let mut config = Config::on_disk(self.base_path.unwrap_or_default(), self.sub_dirs)
            .with_development(self.development)
            .with_use_local_files(self.use_local_files)
            .with_cache_busting_file_pairs(self.cache_busting_file_pairs);
        if let Some(extension) = self.extension {
            config.extension = extension;
        }
        config
    }
}

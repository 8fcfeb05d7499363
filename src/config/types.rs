//! Basic types for configuration

use crate::constants::DEFAULT_EXTENSION;
use include_dir::Dir;
use std::fmt;

/// Where template source files are read from.
#[derive(Clone, Copy, Default)]
pub enum TemplateSource {
    /// Files on the local filesystem, addressed with native separators
    #[default]
    FileSystem,
    /// Files baked into the executable with `include_dir!`
    Embedded(&'static Dir<'static>),
}

impl TemplateSource {
    pub fn is_embedded(&self) -> bool {
        matches!(self, TemplateSource::Embedded(_))
    }
}

impl fmt::Debug for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::FileSystem => write!(f, "FileSystem"),
            TemplateSource::Embedded(bundle) => {
                write!(f, "Embedded({} entries)", bundle.entries().len())
            }
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::FileSystem => write!(f, "local filesystem"),
            TemplateSource::Embedded(_) => write!(f, "embedded files"),
        }
    }
}

pub fn get_default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

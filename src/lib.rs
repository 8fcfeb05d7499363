//! Grouped HTML templates.
//!
//! A template tree is a base directory of shared templates plus named
//! subdirectories. Each subdirectory is compiled, together with the shared
//! templates, into a group of its own; pages are rendered by group and name.

/// Handles argument parsing and command dispatch.
pub mod cli;

/// Configuration of a template tree.
pub mod config;

/// Constants shared across the crate.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for paths and strings.
pub mod ext;

/// A process-wide default instance.
pub mod global;

/// An abstraction over where template sources are read from.
pub mod loader;

/// Building and rendering compiled template groups.
pub mod registry;

/// Template compilation and the helper functions templates can call.
pub mod renderer;

/// Destinations rendered output is written to.
pub mod sink;

/// A config paired with the registry built from it.
pub mod templates;

pub use config::{Config, ConfigFile, TemplateSource};
pub use error::{Error, ErrorKind, Result};
pub use loader::{discover, list_source_files};
pub use registry::{build, Registry};
pub use renderer::{CompiledGroup, HelperFunctions};
pub use sink::{BufferSink, OutputSink, RenderStatus, WriterSink};
pub use templates::Templates;

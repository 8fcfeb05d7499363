//! Configuration for template discovery and rendering
//!
//! This module contains the configuration system components:
//! - `types`: Source selection and defaults
//! - `loader`: The `Config` type, its validation, and config file loading

pub mod loader;
pub mod types;


// Re-export commonly used types for convenience
pub use loader::{Config, ConfigFile};
pub use types::TemplateSource;

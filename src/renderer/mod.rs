//! Template compilation and rendering
//!
//! The module is structured as:
//! - `interface`: Core trait definitions for template compilation
//! - `minijinja`: MiniJinja-based implementation and the compiled group type
//! - `helpers`: Helper functions callable from templates

pub mod helpers;
pub mod interface;
pub mod minijinja;

// Re-export the main types and traits for convenience
pub use helpers::HelperFunctions;
pub use interface::{SourceFile, TemplateRenderer};
pub use minijinja::{CompiledGroup, MiniJinjaRenderer};

use crate::renderer::minijinja::CompiledGroup;

/// One template source handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Name the template is addressed by, the file name with extension
    pub name: String,
    /// Template source text
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self { name: name.into(), content: content.into() }
    }
}

/// Trait for template engines that compile a set of sources into one group.
pub trait TemplateRenderer {
    /// Compiles `sources`, in order, into a single group.
    ///
    /// Sources later in the slice replace earlier ones of the same name.
    ///
    /// # Returns
    /// * `Result<CompiledGroup, minijinja::Error>` - The group, or the first
    ///   source the engine rejected
    fn compile(&self, sources: &[SourceFile]) -> Result<CompiledGroup, minijinja::Error>;
}

use thiserror::Error;

/// Broad failure classes, used by callers that only care about where a
/// failure came from (build-time configuration, discovery, compilation, or
/// a single render call).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Discovery,
    Compile,
    Lookup,
    Execution,
    Io,
    Other,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse config file: {0}.")]
    ConfigParse(String),

    #[error("Cannot proceed: no base path was provided for the templates.")]
    BasePathMissing,

    #[error("Cannot proceed: path '{path}' does not exist.")]
    PathNotFound { path: String },

    #[error("Cannot proceed: an empty or whitespace-only subdirectory name is not allowed.")]
    InvalidSubdirectory,

    #[error("Cannot proceed: embedded source was selected but no embedded files were provided.")]
    NoEmbeddedSource,

    #[error("Invalid helper function name '{name}'.")]
    InvalidHelperName { name: String },

    #[error("Cannot list template files in '{path}'. Original error: {reason}")]
    Discovery { path: String, reason: String },

    /// The engine rejected the merged sources of a group.
    #[error("Failed to compile templates for {}. Original error: {source}", display_group(.group))]
    Compile {
        group: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Invalid subdirectory '{group}': no templates were built for it.")]
    UnknownGroup { group: String },

    #[error("Failed to render '{template}' in {}. Original error: {source}", display_group(.group))]
    Execution {
        group: String,
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BasePathMissing
            | Error::PathNotFound { .. }
            | Error::InvalidSubdirectory
            | Error::NoEmbeddedSource
            | Error::InvalidHelperName { .. }
            | Error::ConfigParse(_)
            | Error::JsonError(_)
            | Error::YamlError(_) => ErrorKind::Configuration,
            Error::Discovery { .. } => ErrorKind::Discovery,
            Error::Compile { .. } => ErrorKind::Compile,
            Error::UnknownGroup { .. } => ErrorKind::Lookup,
            Error::Execution { .. } => ErrorKind::Execution,
            Error::IoError(_) => ErrorKind::Io,
            Error::Other(_) => ErrorKind::Other,
        }
    }
}

fn display_group(group: &str) -> String {
    if group.is_empty() {
        "the base directory".to_string()
    } else {
        format!("subdirectory '{group}'")
    }
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_the_base_group() {
        let source = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "unexpected end");
        let err = Error::Compile { group: String::new(), source };
        assert!(err.to_string().contains("the base directory"));
        assert_eq!(err.kind(), ErrorKind::Compile);
    }

    #[test]
    fn compile_error_names_the_subdirectory() {
        let source = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "unexpected end");
        let err = Error::Compile { group: "app".to_string(), source };
        assert!(err.to_string().contains("subdirectory 'app'"));
    }

    #[test]
    fn kinds_follow_the_failure_class() {
        assert_eq!(Error::BasePathMissing.kind(), ErrorKind::Configuration);
        assert_eq!(Error::NoEmbeddedSource.kind(), ErrorKind::Configuration);
        assert_eq!(
            Error::UnknownGroup { group: "docs".into() }.kind(),
            ErrorKind::Lookup
        );
        assert_eq!(
            Error::Discovery { path: "x".into(), reason: "gone".into() }.kind(),
            ErrorKind::Discovery
        );
    }
}

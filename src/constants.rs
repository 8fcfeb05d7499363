//! Constants used throughout tmplgroups

/// Default template file extension, without the leading dot
pub const DEFAULT_EXTENSION: &str = "html";

/// Registry key of the group compiled from the base directory alone
pub const BASE_GROUP: &str = "";

/// Config file extensions understood by `ConfigFile::load`
pub const JSON_CONFIG_EXTENSIONS: &[&str] = &["json"];
pub const YAML_CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Names of the bundled helper functions
pub mod helpers {
    pub const INDEX_OF: &str = "index_of";
    pub const DATE_REFORMAT: &str = "date_reformat";
    pub const ADD_INT: &str = "add_int";

    /// Input layout accepted by `date_reformat`
    pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}

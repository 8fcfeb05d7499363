use std::path::Path;

/// Extension trait for Path to provide separator-independent rendering
pub trait PathExt {
    /// Renders the path with every separator written as a forward slash.
    ///
    /// Embedded bundles address their files with `/` on every platform, so
    /// paths handed to or produced by the embedded loader go through this.
    ///
    /// # Examples
    /// ```
    /// use tmplgroups::ext::PathExt;
    /// use std::path::Path;
    ///
    /// assert_eq!(Path::new("templates\\app").to_slash(), "templates/app");
    /// ```
    fn to_slash(&self) -> String;
}

impl PathExt for Path {
    fn to_slash(&self) -> String {
        self.to_string_lossy().replace('\\', "/")
    }
}

/// Extension trait for string slices holding file or template names.
pub trait StrExt {
    /// Returns the text after the last `.` of the final path element, or
    /// `None` when that element has no dot at all.
    ///
    /// Only the final element is inspected, so `"v1.2/index"` has no
    /// extension. A leading dot counts (`".html"` yields `"html"`).
    ///
    /// # Examples
    /// ```
    /// use tmplgroups::ext::StrExt;
    ///
    /// assert_eq!("report.html.bak".file_extension(), Some("bak"));
    /// assert_eq!("index".file_extension(), None);
    /// ```
    fn file_extension(&self) -> Option<&str>;

    /// True when the string is empty or only whitespace.
    fn is_blank(&self) -> bool;
}

impl StrExt for str {
    fn file_extension(&self) -> Option<&str> {
        let file_name = match self.rfind(['/', '\\']) {
            Some(idx) => &self[idx + 1..],
            None => self,
        };
        file_name.rfind('.').map(|idx| &file_name[idx + 1..])
    }

    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

//! Helper functions made callable from every compiled template.

use crate::constants::helpers::{ADD_INT, DATE_INPUT_FORMAT, DATE_REFORMAT, INDEX_OF};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use minijinja::functions::Function;
use minijinja::value::{FunctionArgs, FunctionResult, Value};
use std::fmt::{self, Write};

/// Table of named helper functions attached to every compiled group.
///
/// Each entry is a typed minijinja callable: argument conversion and arity
/// are fixed by the Rust signature it was registered with. Names are
/// checked when inserted, so a bad table never reaches the build.
#[derive(Clone, Default)]
pub struct HelperFunctions {
    functions: IndexMap<String, Value>,
}

impl HelperFunctions {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled helpers: `index_of`, `date_reformat` and `add_int`.
    pub fn defaults() -> Self {
        let mut helpers = Self::new();
        helpers.insert_value(INDEX_OF, Value::from_function(index_of));
        helpers.insert_value(DATE_REFORMAT, Value::from_function(date_reformat));
        helpers.insert_value(ADD_INT, Value::from_function(add_int));
        helpers
    }

    /// Registers `f` under `name`, replacing an existing entry of that name.
    ///
    /// # Errors
    /// * `Error::InvalidHelperName` if `name` is not a template identifier
    pub fn insert<F, Rv, Args>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        if !is_identifier(name) {
            return Err(Error::InvalidHelperName { name: name.to_string() });
        }
        self.insert_value(name, Value::from_function::<F, Rv, Args>(f));
        Ok(())
    }

    /// Builder form of [`HelperFunctions::insert`].
    pub fn with<F, Rv, Args>(mut self, name: &str, f: F) -> Result<Self>
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.insert::<F, Rv, Args>(name, f)?;
        Ok(self)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.functions.shift_remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.functions.iter().map(|(name, value)| (name.as_str(), value))
    }

    fn insert_value(&mut self, name: &str, value: Value) {
        self.functions.insert(name.to_string(), value);
    }
}

impl fmt::Debug for HelperFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns the byte position of `needle` in `haystack`, or -1 if it does
/// not occur.
pub fn index_of(needle: &str, haystack: &str) -> i64 {
    haystack.find(needle).map_or(-1, |idx| idx as i64)
}

/// Reformats a `YYYY-MM-DD` date with a strftime-style `format`.
///
/// The input must be exactly four digits, two digits and two digits joined
/// by `-`. Returns `date` unchanged when it does not have that shape, is not
/// a calendar date, or when `format` is not a valid format string.
pub fn date_reformat(date: &str, format: &str) -> String {
    if !is_fixed_width_date(date) {
        return date.to_string();
    }
    let Ok(parsed) = NaiveDate::parse_from_str(date, DATE_INPUT_FORMAT) else {
        return date.to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", parsed.format(format)).is_err() {
        return date.to_string();
    }
    out
}

fn is_fixed_width_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Integer addition. Overflow is reported as a template error.
pub fn add_int(x: i64, y: i64) -> Result<i64, minijinja::Error> {
    x.checked_add(y).ok_or_else(|| {
        minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            format!("add_int({x}, {y}) overflows"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of() {
        assert_eq!(index_of("d", "asdfghjkl"), 2);
        assert_eq!(index_of("p", "asdfghjkl"), -1);
        assert_eq!(index_of("", "abc"), 0);
    }

    #[test]
    fn test_date_reformat() {
        assert_eq!(date_reformat("2020-01-01", "%m/%d/%Y"), "01/01/2020");
        assert_eq!(date_reformat("2020-02-29", "%B %-d, %Y"), "February 29, 2020");
    }

    #[test]
    fn test_date_reformat_keeps_invalid_dates() {
        assert_eq!(date_reformat("2020-01-32", "%m/%d/%Y"), "2020-01-32");
        assert_eq!(date_reformat("not a date", "%m/%d/%Y"), "not a date");
        for loose in [
            "2020-1-5",
            " 2020-01-05",
            "+2020-01-05",
            "2020-01-05 ",
            "02020-01-05",
            "2020/01/05",
        ] {
            assert_eq!(date_reformat(loose, "%d.%m.%Y"), loose);
        }
    }

    #[test]
    fn test_date_reformat_keeps_input_on_bad_format() {
        assert_eq!(date_reformat("2020-01-01", "%Q"), "2020-01-01");
    }

    #[test]
    fn test_add_int() {
        assert_eq!(add_int(1, 8).unwrap(), 9);
        assert_eq!(add_int(3, 4).unwrap(), 7);
        assert!(add_int(i64::MAX, 1).is_err());
    }

    #[test]
    fn defaults_are_registered() {
        let helpers = HelperFunctions::defaults();
        assert_eq!(
            helpers.names().collect::<Vec<_>>(),
            vec![INDEX_OF, DATE_REFORMAT, ADD_INT]
        );
    }

    #[test]
    fn insert_rejects_bad_names() {
        let mut helpers = HelperFunctions::new();
        for bad in ["", "1st", "with space", "dash-name", "dotted.name"] {
            let err = helpers.insert(bad, add_int).unwrap_err();
            assert!(matches!(err, Error::InvalidHelperName { .. }), "{bad}");
        }
        assert!(helpers.is_empty());
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut helpers = HelperFunctions::defaults();
        helpers.insert(ADD_INT, |x: i64, y: i64| x * y).unwrap();
        assert_eq!(helpers.len(), 3);
        assert!(helpers.remove(INDEX_OF));
        assert!(!helpers.contains(INDEX_OF));
    }

    #[test]
    fn with_registers_closures() {
        let helpers = HelperFunctions::new()
            .with("twice", |x: i64| x * 2)
            .unwrap()
            .with("greet", |name: String| format!("hi {name}"))
            .unwrap();
        assert_eq!(helpers.names().collect::<Vec<_>>(), vec!["twice", "greet"]);
    }
}

//! Call-site capture for log entries
//!
//! Plain method calls record the caller's file and line through
//! `#[track_caller]`. The logging macros additionally record the name of the
//! enclosing function, which the compiler does not expose to `Location`.

use std::panic::Location;
use std::path::Path;

/// Location in application code that issued a log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub function: Option<String>,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: &str, function: Option<&str>, line: u32) -> Self {
        Self {
            file: file.to_string(),
            function: function.filter(|f| !f.is_empty()).map(String::from),
            line,
        }
    }

    /// Capture the nearest caller outside `#[track_caller]` frames
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), None, location.line())
    }

    /// File name without its directories
    pub fn file_name(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(self.file.as_str())
    }
}

/// Strip the helper suffix and closure segments from a `type_name` path
#[doc(hidden)]
pub fn __function_name(path: &'static str) -> &'static str {
    let path = path.strip_suffix("::__f").unwrap_or(path);
    path.rsplit("::")
        .find(|segment| *segment != "{{closure}}")
        .unwrap_or(path)
}

/// Name of the enclosing function
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::core::call_site::__function_name(__type_name_of(__f))
    }};
}

/// [`CallSite`] of the macro invocation, including the function name
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::core::CallSite::new(file!(), Some($crate::function_name!()), line!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_reports_this_file() {
        let site = CallSite::caller();
        assert_eq!(site.file_name(), "call_site.rs");
        assert!(site.line > 0);
        assert!(site.function.is_none());
    }

    #[test]
    fn test_function_name_macro() {
        assert_eq!(crate::function_name!(), "test_function_name_macro");

        let from_closure = (|| crate::function_name!())();
        assert_eq!(from_closure, "test_function_name_macro");
    }

    #[test]
    fn test_call_site_macro() {
        let site = crate::call_site!();
        assert_eq!(site.file_name(), "call_site.rs");
        assert_eq!(site.function.as_deref(), Some("test_call_site_macro"));
    }

    #[test]
    fn test_empty_function_is_absent() {
        let site = CallSite::new("src/main.rs", Some(""), 3);
        assert_eq!(site.function, None);
        assert_eq!(site.file_name(), "main.rs");
    }
}

//! Call-site capture
//!
//! File and line come from [`std::panic::Location`], propagated through
//! `#[track_caller]` on every public logging entry point. The function name
//! cannot be recovered from a `Location`; the logging macros fill it in with
//! [`function_name!`](crate::function_name).

use super::value::Attr;
use std::panic::Location;

/// Key of the synthetic caller group attached to every record
pub const CALLER_KEY: &str = "caller";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Qualified function name, when known
    pub name: Option<String>,
    pub file: String,
    pub line: u32,
}

impl Caller {
    /// The location of the outermost `#[track_caller]` frame
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            name: None,
            file: location.file().to_string(),
            line: location.line(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Group attribute in the shape handlers expect: `name`, `file`, `line`
    pub fn to_attr(&self) -> Attr {
        let mut members = Vec::with_capacity(3);
        if let Some(ref name) = self.name {
            members.push(Attr::new("name", name.as_str()));
        }
        members.push(Attr::new("file", self.file.as_str()));
        members.push(Attr::new("line", i64::from(self.line)));
        Attr::group(CALLER_KEY, members)
    }
}

/// Strip the helper suffix from a `type_name` produced inside
/// [`function_name!`](crate::function_name).
#[doc(hidden)]
pub fn trim_function_name(raw: &'static str) -> &'static str {
    let mut name = raw.strip_suffix("::__f").unwrap_or(raw);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn tracked() -> Caller {
        Caller::here()
    }

    #[test]
    fn test_here_honors_track_caller() {
        let expected_line = line!() + 1;
        let caller = tracked();
        assert_eq!(caller.line, expected_line);
        assert_eq!(caller.file, file!());
        assert_eq!(caller.name, None);
    }

    #[test]
    fn test_function_name_macro() {
        let name = crate::function_name!();
        assert!(
            name.ends_with("caller::tests::test_function_name_macro"),
            "unexpected name: {}",
            name
        );
    }

    #[test]
    fn test_function_name_inside_closure() {
        let name = (|| crate::function_name!())();
        assert!(
            name.ends_with("tests::test_function_name_inside_closure"),
            "unexpected name: {}",
            name
        );
    }

    #[test]
    fn test_caller_attr_shape() {
        let attr = Caller {
            name: Some("app::main".to_string()),
            file: "src/main.rs".to_string(),
            line: 12,
        }
        .to_attr();
        assert_eq!(
            attr.to_string(),
            "(caller: (name: app::main) (file: src/main.rs) (line: 12))"
        );
    }
}

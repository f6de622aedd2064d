use std::fmt;

use thiserror::Error;

/// Text that is not a plain elisp symbol and would change the form if
/// written verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{0}` is not a plain elisp symbol")]
pub struct InvalidSymbol(pub String);

/// Symbol characters only: no whitespace, quoting, or list syntax, and not
/// starting with a digit.
pub fn is_symbol(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || "-_/:*+!<>=?.%&".contains(c))
}

/// A checked elisp symbol name, written verbatim into expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: &str) -> Result<Self, InvalidSymbol> {
        if is_symbol(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(InvalidSymbol(name.to_string()))
        }
    }

    /// For names fixed in source.
    ///
    /// # Panics
    ///
    /// If `name` is not a plain symbol.
    pub fn from_static(name: &'static str) -> Self {
        assert!(is_symbol(name), "`{name}` is not a plain elisp symbol");
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

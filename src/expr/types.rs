//! Argument kinds and the finished expression type.

use std::fmt;

use crate::escape::{build_list_literal, quote_string};

use super::{Call, InvalidSymbol, Symbol};

/// The elisp null literal, also used for false and for absent arguments.
pub const NIL: &str = "nil";

/// The elisp true literal.
pub const T: &str = "t";

/// One positional argument to a remote procedure.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Quoted and escaped string literal.
    Str(String),
    /// Bare integer literal.
    Int(i64),
    /// Bare float literal. Non-finite values render as `nil`.
    Float(f64),
    /// `t` or `nil`.
    Bool(bool),
    /// `(list "a" "b")`, always rendered, even when empty.
    List(Vec<String>),
    /// Quoted symbol: `'force`. Only checked names can be held here.
    Symbol(Symbol),
    /// The null literal.
    Nil,
    /// A nested call form.
    Form(Box<Call>),
}

impl Arg {
    pub fn str(value: impl Into<String>) -> Self {
        Arg::Str(value.into())
    }

    /// Absent or empty strings become `nil`.
    pub fn opt_str(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Arg::Str(v.to_string()),
            _ => Arg::Nil,
        }
    }

    /// Absent or empty lists become `nil`.
    pub fn opt_list<S: AsRef<str>>(value: Option<&[S]>) -> Self {
        match value {
            Some(items) if !items.is_empty() => {
                Arg::List(items.iter().map(|s| s.as_ref().to_string()).collect())
            }
            _ => Arg::Nil,
        }
    }

    pub fn list<S: AsRef<str>>(items: &[S]) -> Self {
        Arg::List(items.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// Quoted symbol from caller text; refused unless it is a plain symbol.
    pub fn symbol(name: &str) -> Result<Self, InvalidSymbol> {
        Symbol::new(name).map(Arg::Symbol)
    }

    pub fn form(call: Call) -> Self {
        Arg::Form(Box::new(call))
    }

    /// Render this argument as elisp source.
    pub fn render(&self) -> String {
        match self {
            Arg::Str(s) => quote_string(s),
            Arg::Int(n) => n.to_string(),
            Arg::Float(f) => render_float(*f),
            Arg::Bool(true) => T.to_string(),
            Arg::Bool(false) | Arg::Nil => NIL.to_string(),
            Arg::List(items) => build_list_literal(items),
            Arg::Symbol(name) => format!("'{name}"),
            Arg::Form(call) => call.render(),
        }
    }
}

/// Floats always carry a decimal point so elisp reads them as floats.
fn render_float(f: f64) -> String {
    if !f.is_finite() {
        NIL.to_string()
    } else if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

/// A complete elisp call form, ready for shell escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression(String);

impl Expression {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Expression {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

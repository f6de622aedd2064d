use super::symbol::{InvalidSymbol, Symbol};
use super::types::{Arg, Expression};

/// A named remote procedure and its positional arguments.
///
/// The remote side is positional: every argument a procedure declares must
/// be present, so absent optional values are passed as [`Arg::Nil`] rather
/// than dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    procedure: Symbol,
    args: Vec<Arg>,
}

impl Call {
    /// A call to a procedure named in source.
    ///
    /// # Panics
    ///
    /// If `procedure` is not a plain elisp symbol.
    pub fn new(procedure: &'static str) -> Self {
        Self::with_symbol(Symbol::from_static(procedure))
    }

    /// A call to a procedure named at runtime, refused unless it is a
    /// plain symbol.
    pub fn try_new(procedure: &str) -> Result<Self, InvalidSymbol> {
        Symbol::new(procedure).map(Self::with_symbol)
    }

    pub fn with_symbol(procedure: Symbol) -> Self {
        Self {
            procedure,
            args: Vec::new(),
        }
    }

    pub fn procedure(&self) -> &str {
        self.procedure.as_str()
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn str(self, value: impl Into<String>) -> Self {
        self.arg(Arg::Str(value.into()))
    }

    pub fn int(self, value: i64) -> Self {
        self.arg(Arg::Int(value))
    }

    pub fn float(self, value: f64) -> Self {
        self.arg(Arg::Float(value))
    }

    pub fn opt_str(self, value: Option<&str>) -> Self {
        self.arg(Arg::opt_str(value))
    }

    pub fn list<S: AsRef<str>>(self, items: &[S]) -> Self {
        self.arg(Arg::list(items))
    }

    pub fn opt_list<S: AsRef<str>>(self, items: Option<&[S]>) -> Self {
        self.arg(Arg::opt_list(items))
    }

    pub fn nil(self) -> Self {
        self.arg(Arg::Nil)
    }

    pub(crate) fn render(&self) -> String {
        let name = self.procedure.as_str();
        let mut out = String::with_capacity(name.len() + 2 + self.args.len() * 8);
        out.push('(');
        out.push_str(name);
        for arg in &self.args {
            out.push(' ');
            out.push_str(&arg.render());
        }
        out.push(')');
        out
    }

    /// Render the whole call. Pure: the same call always yields the same text.
    pub fn build(&self) -> Expression {
        Expression::new(self.render())
    }
}

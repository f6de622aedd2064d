//! Expression building: named remote calls from escaped, typed arguments.

pub mod builder;
pub mod symbol;
pub mod types;

pub use builder::Call;
pub use symbol::{InvalidSymbol, Symbol, is_symbol};
pub use types::{Arg, Expression, NIL, T};

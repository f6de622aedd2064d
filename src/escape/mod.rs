//! Escaping for the two layers every expression crosses: elisp string
//! literals, then a double-quoted shell argument.
//!
//! The elisp pass runs per argument while building; the shell pass runs
//! once on the finished expression. Running them in the other order
//! double-escapes.

pub mod elisp;
pub mod shell;

pub use elisp::{build_list_literal, escape_for_expression, quote_string};
pub use shell::{escape_for_shell, quote_word};

use std::borrow::Cow;

/// Escape a finished expression for the inside of a double-quoted shell word.
///
/// Backslash, double quote, backtick and dollar sign are the characters a
/// POSIX shell still interprets between double quotes; each gets a
/// backslash. The result must be wrapped in `"..."` by the caller.
pub fn escape_for_shell(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len() + expression.len() / 4);
    for c in expression.chars() {
        match c {
            '\\' | '"' | '`' | '$' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Quote a single word (binary path, endpoint path) for the command line.
///
/// Words that need no quoting come back borrowed. Fails only for text the
/// shell cannot carry at all (an interior NUL).
pub fn quote_word(word: &str) -> Result<Cow<'_, str>, shlex::QuoteError> {
    shlex::try_quote(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_shell_metacharacters() {
        assert_eq!(escape_for_shell("$(rm -rf ~)"), "\\$(rm -rf ~)");
        assert_eq!(escape_for_shell("`id`"), "\\`id\\`");
    }

    #[test]
    fn escapes_expression_quotes_again() {
        // (f "a \"b\"") as produced by the expression builder
        let expr = "(f \"a \\\"b\\\"\")";
        assert_eq!(escape_for_shell(expr), "(f \\\"a \\\\\\\"b\\\\\\\"\\\")");
    }

    #[test]
    fn single_quotes_pass_through() {
        assert_eq!(escape_for_shell("(org-roam-db-sync 'force)"), "(org-roam-db-sync 'force)");
    }

    #[test]
    fn round_trips_through_posix_word_splitting() {
        let expr = "(f \"x\\\\y\" \"$HOME\" \"`id`\" 'sym)";
        let line = format!("emacsclient -e \"{}\"", escape_for_shell(expr));
        let words = shlex::split(&line).unwrap();
        assert_eq!(words, vec!["emacsclient", "-e", expr]);
    }

    #[test]
    fn quote_word_plain_path_borrowed() {
        assert_eq!(quote_word("/tmp/server").unwrap(), "/tmp/server");
    }

    #[test]
    fn quote_word_with_spaces_round_trips() {
        let path = "/home/me/emacs server/it's";
        let quoted = quote_word(path).unwrap();
        assert_eq!(shlex::split(&quoted).unwrap(), vec![path]);
    }

    #[test]
    fn quote_word_rejects_nul() {
        assert!(quote_word("a\0b").is_err());
    }
}

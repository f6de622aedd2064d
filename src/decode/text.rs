//! Plain-text replies: procedures that answer with a printed elisp string
//! (`"Added entry..."`) instead of JSON.

/// Trim the reply and, if it is a printed string literal, unquote it.
///
/// Resolves `\"`, `\\`, `\n` and `\t`; any other backslash pair is kept
/// as written. Text that is not a string literal (`t`, `42`) comes back
/// trimmed and otherwise untouched.
pub fn decode_text(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(body) => unescape_printed(body),
        None => trimmed.to_string(),
    }
}

fn unescape_printed(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquotes_printed_string() {
        assert_eq!(
            decode_text("\"Daily note content\\nWith multiple lines\"\n"),
            "Daily note content\nWith multiple lines"
        );
    }

    #[test]
    fn resolves_escaped_quotes_and_backslashes() {
        assert_eq!(decode_text(r#""say \"hi\" C:\\tmp""#), r#"say "hi" C:\tmp"#);
    }

    #[test]
    fn raw_newlines_preserved() {
        assert_eq!(decode_text("\"a\nb\""), "a\nb");
    }

    #[test]
    fn bare_values_trimmed() {
        assert_eq!(decode_text("t\n"), "t");
        assert_eq!(decode_text("  42 "), "42");
        assert_eq!(decode_text("\""), "\"");
    }

    #[test]
    fn unknown_escape_kept() {
        assert_eq!(decode_text(r#""\x41""#), r"\x41");
    }
}

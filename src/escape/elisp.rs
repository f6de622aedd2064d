/// List constructor used for list-valued arguments.
pub const LIST_CONSTRUCTOR: &str = "list";

/// Escape text for the inside of an elisp string literal.
///
/// Backslash, double quote, newline and tab become `\\`, `\"`, `\n`, `\t`.
/// NUL, which no process argument can carry, becomes the octal `\000`;
/// all three digits are written so a digit that follows stays data.
/// One pass over the input, equivalent to replacing backslashes first and
/// the rest afterwards.
pub fn escape_for_expression(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\000"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape and wrap in double quotes: `he said "hi"` → `"he said \"hi\""`.
pub fn quote_string(text: &str) -> String {
    format!("\"{}\"", escape_for_expression(text))
}

/// Render strings as `(list "a" "b")`. An empty slice gives `(list )`.
pub fn build_list_literal<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| quote_string(i.as_ref())).collect();
    format!("({LIST_CONSTRUCTOR} {})", quoted.join(" "))
}

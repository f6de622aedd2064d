//! Control-character repair for JSON produced by Emacs' `json-encode`,
//! which does not always escape control characters inside strings.

/// Escape raw control characters that appear inside JSON strings.
///
/// String boundaries are tracked by toggling on unescaped `"`. Outside
/// strings every character passes through. Inside strings, valid escape
/// sequences are copied whole, so running this twice changes nothing.
pub fn preclean(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut i = 0;

    while i < len {
        let c = chars[i];

        if in_string && c == '\\' {
            let n = escape_sequence_len(&chars[i..]).unwrap_or(1);
            out.extend(&chars[i..i + n]);
            i += n;
            continue;
        }
        if c == '"' {
            in_string = !in_string;
            out.push(c);
            i += 1;
            continue;
        }
        if in_string {
            push_char(&mut out, c);
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

/// Escape every control character, with no string tracking.
///
/// Used on the payload of a double-encoded reply, where the whole text was
/// the body of one string. Valid escape sequences are still kept intact.
pub fn sweep_control_chars(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < len {
        let c = chars[i];
        if c == '\\'
            && let Some(n) = escape_sequence_len(&chars[i..])
        {
            out.extend(&chars[i..i + n]);
            i += n;
            continue;
        }
        push_char(&mut out, c);
        i += 1;
    }

    out
}

/// Length of the JSON escape sequence starting at `chars[0]` (a backslash),
/// or `None` if what follows is not a valid escape.
fn escape_sequence_len(chars: &[char]) -> Option<usize> {
    match chars.get(1)? {
        '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => Some(2),
        'u' if chars.len() >= 6 && chars[2..6].iter().all(char::is_ascii_hexdigit) => Some(6),
        _ => None,
    }
}

/// C0 controls, DEL, and C1 controls.
fn is_control(c: char) -> bool {
    matches!(c as u32, 0x00..=0x1F | 0x7F | 0x80..=0x9F)
}

fn push_char(out: &mut String, c: char) {
    if !is_control(c) {
        out.push(c);
        return;
    }
    match c {
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        _ => out.push_str(&format!("\\u{:04x}", c as u32)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_json_unchanged() {
        let text = r#"{"a": "b\n\"c\"", "n": [1, 2]}"#;
        assert_eq!(preclean(text), text);
    }

    #[test]
    fn raw_newline_inside_string_escaped() {
        assert_eq!(preclean("{\"msg\":\"line1\nline2\"}"), r#"{"msg":"line1\nline2"}"#);
    }

    #[test]
    fn whitespace_outside_strings_untouched() {
        let text = "{\n\t\"a\": 1\r\n}";
        assert_eq!(preclean(text), text);
    }

    #[test]
    fn other_controls_use_unicode_escapes() {
        assert_eq!(preclean("\"a\u{1}b\u{7f}c\u{85}\""), r#""a\u0001b\u007fc\u0085""#);
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        // "say \"hi<TAB>\"" keeps us inside the string across \"
        assert_eq!(preclean("\"say \\\"hi\t\\\"\""), r#""say \"hi\t\"""#);
    }

    #[test]
    fn escaped_backslash_before_quote_ends_string() {
        // "a\\" then a raw tab outside, which must not be escaped
        assert_eq!(preclean("\"a\\\\\"\t"), "\"a\\\\\"\t");
    }

    #[test]
    fn unicode_escape_kept() {
        assert_eq!(preclean(r#""caf\u00e9""#), r#""caf\u00e9""#);
    }

    #[test]
    fn idempotent_on_repaired_text() {
        let raw = "{\"a\":\"x\ny\u{1}\",\"b\":\"\\\\\"}";
        let once = preclean(raw);
        assert_eq!(preclean(&once), once);
    }

    #[test]
    fn sweep_escapes_everywhere() {
        assert_eq!(sweep_control_chars("{\n\"a\":\"b\tc\"}"), "{\\n\"a\":\"b\\tc\"}");
    }

    #[test]
    fn sweep_keeps_escape_sequences() {
        assert_eq!(sweep_control_chars(r#"\nA\""#), r#"\nA\""#);
    }

    #[test]
    fn non_ascii_text_passes_through() {
        assert_eq!(preclean("\"日本語 ✓\""), "\"日本語 ✓\"");
    }
}

//! Name synthesis for declarations and field keys.
//!
//! This module provides the pure string helpers shared by the synthesis
//! engine, the assembler, and the emitter.

/// Name used when a raw key yields no identifier characters at all (e.g. the path `/`).
pub const EMPTY_NAME: &str = "Root";

/// Check if a character may appear inside an identifier.
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Check if a field key must be quoted to be used as a property key.
///
/// Returns true if the key:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
///   (this covers `?`, `!`, `<`, `>`, `.`, `,`, `[]` and the like)
pub fn needs_quoting(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    !(first.is_alphabetic() || first == '_' || first == '$') || !chars.all(is_identifier_char)
}

/// Escape a string for use in a double-quoted string literal.
///
/// Backslashes, double quotes, and line breaks get their short escapes.
/// Other control characters and the line and paragraph separators
/// (U+2028, U+2029) become `\uXXXX` escapes.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out
}

/// Render a field key so it is legal in property position.
///
/// Plain identifiers pass through unchanged; anything else is quoted with
/// special characters escaped, so the key keeps its exact original meaning.
pub fn sanitize_field_key(key: &str) -> String {
    if needs_quoting(key) {
        format!("\"{}\"", escape_string(key))
    } else {
        key.to_string()
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert an arbitrary key (path, schema key, method, status code) to a declaration name.
///
/// - Splits on `/`, `-` and spaces; path-parameter braces are dropped
/// - Capitalizes the first letter of every segment and concatenates them
/// - Replaces remaining non-identifier characters with `_`
/// - Prepends `_` if the result starts with a digit
/// - Falls back to [`EMPTY_NAME`] when nothing is left
pub fn to_declaration_name(raw: &str) -> String {
    let joined: String = raw
        .split(['/', '-', ' '])
        .map(|segment| capitalize_first(&segment.replace(['{', '}'], "")))
        .collect();

    let mut name: String = joined
        .chars()
        .map(|c| if is_identifier_char(c) { c } else { '_' })
        .collect();

    if name.is_empty() {
        return EMPTY_NAME.to_string();
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    name
}

/// Join name parts and synthesize one declaration name from them.
///
/// `compose_name(&["Widgets", "get"])` is `WidgetsGet`.
pub fn compose_name(parts: &[&str]) -> String {
    to_declaration_name(&parts.join("-"))
}

/// Numbered variant of a name, used when the plain name is already taken.
///
/// A base that ends in a digit gets an `_` separator so `Response200` + 2
/// does not read as `Response2002`.
pub fn numbered_name(base: &str, n: usize) -> String {
    if base.ends_with(|c: char| c.is_ascii_digit()) {
        format!("{base}_{n}")
    } else {
        format!("{base}{n}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_declaration_name() {
        assert_eq!(to_declaration_name("Super/Duper-Unit test"), "SuperDuperUnitTest");
        assert_eq!(to_declaration_name("/widgets"), "Widgets");
        assert_eq!(to_declaration_name("/widgets/{widgetId}"), "WidgetsWidgetId");
        assert_eq!(to_declaration_name("widget"), "Widget");
        assert_eq!(to_declaration_name("Widget"), "Widget");
    }

    #[test]
    fn test_to_declaration_name_edge_cases() {
        assert_eq!(to_declaration_name("/"), "Root");
        assert_eq!(to_declaration_name(""), "Root");
        assert_eq!(to_declaration_name("200"), "_200");
        assert_eq!(to_declaration_name("v1.2"), "V1_2");
        assert_eq!(to_declaration_name("a//b"), "AB");
        assert_eq!(to_declaration_name("{id}"), "Id");
    }

    #[test]
    fn test_to_declaration_name_is_deterministic() {
        let raw = "/orders/{orderId}/line-items";
        assert_eq!(to_declaration_name(raw), to_declaration_name(raw));
        assert_eq!(to_declaration_name(raw), "OrdersOrderIdLineItems");
    }

    #[test]
    fn test_compose_name() {
        assert_eq!(compose_name(&["Widgets", "get"]), "WidgetsGet");
        assert_eq!(
            compose_name(&["WidgetsGet", "Response", "200"]),
            "WidgetsGetResponse200"
        );
        assert_eq!(compose_name(&["Widget", "created_at"]), "WidgetCreated_at");
    }

    #[test]
    fn test_needs_quoting() {
        // Valid identifiers
        assert!(!needs_quoting("foo"));
        assert!(!needs_quoting("_foo"));
        assert!(!needs_quoting("$foo"));
        assert!(!needs_quoting("foo123"));
        assert!(!needs_quoting("camelCase"));

        // Reserved characters and other non-identifiers
        for key in ["", "123foo", "foo?", "foo!", "a<b>", "foo.bar", "a,b", "tags[]", "foo-bar", "foo bar"] {
            assert!(needs_quoting(key), "{key} should need quoting");
        }
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("hello"), "hello");
        assert_eq!(escape_string("hel\"lo"), "hel\\\"lo");
        assert_eq!(escape_string("hel\\lo"), "hel\\\\lo");
        assert_eq!(escape_string("a\\\"b"), "a\\\\\\\"b");

        assert_eq!(escape_string("a\nb"), "a\\nb");
        assert_eq!(escape_string("a\r\n\tb"), "a\\r\\n\\tb");
        assert_eq!(escape_string("a\u{2028}b\u{2029}"), "a\\u2028b\\u2029");
        assert_eq!(escape_string("\u{0}\u{1b}\u{7f}"), "\\u0000\\u001b\\u007f");
        assert_eq!(escape_string("caf\u{e9}"), "caf\u{e9}");
    }

    #[test]
    fn test_sanitize_field_key() {
        assert_eq!(sanitize_field_key("foo"), "foo");
        assert_eq!(sanitize_field_key("foo?"), "\"foo?\"");
        assert_eq!(sanitize_field_key("tags[]"), "\"tags[]\"");
        assert_eq!(sanitize_field_key("200"), "\"200\"");
        assert_eq!(sanitize_field_key("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("foo"), "Foo");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("a"), "A");
        assert_eq!(capitalize_first("ABC"), "ABC");
    }

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name("Widget", 2), "Widget2");
        assert_eq!(numbered_name("WidgetsGetResponse200", 2), "WidgetsGetResponse200_2");
    }
}

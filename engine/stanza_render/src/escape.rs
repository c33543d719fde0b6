//! HTML escaping.

use std::borrow::Cow;

/// Escape text for safe inclusion in HTML content or attribute values.
///
/// Borrows the input unchanged when nothing needs escaping.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let needs_escaping = |c: char| matches!(c, '&' | '<' | '>' | '"' | '\'');
    let Some(first) = text.find(needs_escaping) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_text_is_borrowed() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn special_characters_are_escaped() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html("\"x\" > 'y'"), "&quot;x&quot; &gt; &#x27;y&#x27;");
    }

    #[test]
    fn escaping_starts_mid_string() {
        assert_eq!(escape_html("safe prefix <b>"), "safe prefix &lt;b&gt;");
    }
}

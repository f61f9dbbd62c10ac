//! Thin wrappers over `html-escape` so call sites stay short.

use std::borrow::Cow;

pub(crate) fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

pub(crate) fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_escaping_neutralizes_the_closing_quote() {
        assert_eq!(attr(r#""/><script>"#), r#"&quot;/><script>"#);
    }

    #[test]
    fn text_escaping_leaves_plain_strings_untouched() {
        assert_eq!(text("Enter a name"), "Enter a name");
        assert_eq!(text("a < b"), "a &lt; b");
    }
}

//! Escaping of markdown control characters in plain text.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that are prefixed with `\` when escaping.
pub const SPECIAL_CHARACTERS: [char; 5] = ['*', '~', '_', '`', '|'];

// Same shape as the bare link rule, unanchored.
#[allow(clippy::unwrap_used)]
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<]+[^<.,:;"')\]\s]"#).unwrap());

#[allow(clippy::unwrap_used)]
static TRAILING_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S*\z").unwrap());

/// Prefix every special character with a backslash.
///
/// ```
/// use reserializer_markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*a* ~b~ _c_"), r"\*a\* \~b\~ \_c\_");
/// ```
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL_CHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape `text`, leaving URLs untouched.
///
/// With `continues_url` set, the text is treated as the tail of a URL that
/// was already written, so everything up to the first whitespace is kept
/// as is.
#[must_use]
pub fn escape_outside_urls(text: &str, continues_url: bool) -> String {
    let (kept, rest) = if continues_url {
        let end = text.find(char::is_whitespace).unwrap_or(text.len());
        text.split_at(end)
    } else {
        ("", text)
    };

    let mut escaped = String::with_capacity(text.len());
    escaped.push_str(kept);

    let mut last = 0;
    for url in URL_RE.find_iter(rest) {
        escaped.push_str(&escape_markdown(&rest[last..url.start()]));
        escaped.push_str(url.as_str());
        last = url.end();
    }
    escaped.push_str(&escape_markdown(&rest[last..]));
    escaped
}

/// Returns whether `text` ends inside a URL, i.e. its last whitespace
/// separated word starts with `http://` or `https://`.
#[must_use]
pub fn ends_with_url(text: &str) -> bool {
    let last_word = text
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default();
    TRAILING_URL_RE
        .find(last_word)
        .is_some_and(|url| url.start() == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_every_special_character() {
        assert_eq!(escape_markdown("a*b~c_d`e|f"), r"a\*b\~c\_d\`e\|f");
        assert_eq!(escape_markdown("plain text"), "plain text");
    }

    #[test]
    fn test_escape_keeps_urls() {
        assert_eq!(
            escape_outside_urls("see https://example.com/a_b and _this_", false),
            r"see https://example.com/a_b and \_this\_"
        );
    }

    #[test]
    fn test_escape_continued_url() {
        assert_eq!(escape_outside_urls("_b_c rest_", true), r"_b_c rest\_");
        assert_eq!(escape_outside_urls(" _x_", true), r" \_x\_");
    }

    #[test]
    fn test_ends_with_url() {
        assert!(ends_with_url("go to https://example.com/a"));
        assert!(ends_with_url("http://x"));
        assert!(!ends_with_url("https://example.com done"));
        assert!(!ends_with_url("xhttps://example.com"));
        assert!(!ends_with_url(""));
    }
}

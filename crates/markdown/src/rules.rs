//! Built-in rules for Discord flavoured markdown.
//!
//! The `regex` crate has no look-around. Where a delimiter must not be
//! followed by another delimiter character, the pattern consumes that one
//! extra character and the rule reports a shorter `consumed` length, which
//! leaves the character for the next rule.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::node::Node;
use crate::rule::{MatchContext, ParseSpec, ParseState, Rule, RuleSet};
use crate::style::{MentionKind, Style};

// Regex patterns - these are valid static patterns that cannot fail
#[allow(clippy::unwrap_used)]
static ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\\([^0-9A-Za-z\s])").unwrap());

#[allow(clippy::unwrap_used)]
static NEWLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A(?:\n *)*\n").unwrap());

#[allow(clippy::unwrap_used)]
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\*\*([\s\S]+?)\*\*(?:[^*]|\z)").unwrap());

#[allow(clippy::unwrap_used)]
static UNDERLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A__([\s\S]+?)__(?:[^_]|\z)").unwrap());

// Group 1: `_inner_`, group 2: `*inner*`.
#[allow(clippy::unwrap_used)]
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\A(?:",
        r"_((?:__|\\[\s\S]|[^\\_])+?)_\b",
        r"|",
        r"\*((?:\*\*|[^\s*])(?:\*\*|\s+(?:[^*\s]|\*\*)|[^\s*])*?)\*(?:[^*]|\z)",
        r")"
    ))
    .unwrap()
});

#[allow(clippy::unwrap_used)]
static STRIKETHROUGH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A~~(\S|\S[\s\S]*?\S)~~").unwrap());

#[allow(clippy::unwrap_used)]
static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A> (.+(?:\n> .+)*)").unwrap());

#[allow(clippy::unwrap_used)]
static SPOILER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\|\|([\s\S]+?)\|\|").unwrap());

#[allow(clippy::unwrap_used)]
static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A```(?:([^\s`]+)[\n ])?\n*([\s\S]+?)\n*```").unwrap()
});

#[allow(clippy::unwrap_used)]
static CODE_INLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A`(.+?)`").unwrap());

#[allow(clippy::unwrap_used)]
static EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A<a?:(\w+):(\d+)>").unwrap());

#[allow(clippy::unwrap_used)]
static CHANNEL_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A<#(\d+)>").unwrap());

#[allow(clippy::unwrap_used)]
static USER_MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A<@!?(\d+)>").unwrap());

#[allow(clippy::unwrap_used)]
static ROLE_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A<@&(\d+)>").unwrap());

#[allow(clippy::unwrap_used)]
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\Ahttps?://[^\s<]+[^<.,:;"')\]\s]"#).unwrap());

// Shortest prefix followed by a special character, a newline, a hard break,
// a `word:` pattern (so links get a chance), or the end of the input.
#[allow(clippy::unwrap_used)]
static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\A([\s\S]+?)",
        r"(?:[^0-9A-Za-z\s\x{C0}-\x{D7FF}\x{E000}-\x{10FFFF}]|\n| {2,}\n|\w+:\S|\z)"
    ))
    .unwrap()
});

fn whole(captures: &Captures<'_>) -> usize {
    captures.get(0).map_or(0, |m| m.end())
}

fn group<'c>(captures: &Captures<'c>, index: usize) -> &'c str {
    captures.get(index).map_or("", |m| m.as_str())
}

fn group_range(captures: &Captures<'_>, index: usize) -> Range<usize> {
    captures.get(index).map_or(0..0, |m| m.range())
}

/// `\*` → `*`
#[must_use]
pub fn escape_rule() -> Rule {
    Rule::new("escape", ESCAPE_RE.clone(), |caps, state| {
        ParseSpec::terminal(Node::text(group(caps, 1)), state, whole(caps))
    })
}

/// One or more line breaks, kept verbatim.
#[must_use]
pub fn newline_rule() -> Rule {
    Rule::new("newline", NEWLINE_RE.clone(), |caps, state| {
        ParseSpec::terminal(Node::text(group(caps, 0)), state, whole(caps))
    })
}

/// Delimited span whose inner text is parsed again.
fn delimited_rule(name: &'static str, pattern: &Regex, style: Style, delimiter: usize) -> Rule {
    Rule::new(name, pattern.clone(), move |caps, state| {
        let inner = group_range(caps, 1);
        let consumed = inner.end + delimiter;
        ParseSpec::non_terminal(vec![style.clone()], state, consumed, inner)
    })
}

/// `**bold**`
#[must_use]
pub fn bold_rule() -> Rule {
    delimited_rule("bold", &BOLD_RE, Style::Bold, 2)
}

/// `__underline__`
#[must_use]
pub fn underline_rule() -> Rule {
    delimited_rule("underline", &UNDERLINE_RE, Style::Underline, 2)
}

/// `*italic*` or `_italic_`.
///
/// The underscore form does not open directly after a word character, so
/// `snake_case_names` stay plain text.
#[must_use]
pub fn italic_rule() -> Rule {
    Rule::new("italic", ITALIC_RE.clone(), |caps, state| {
        let asterisk = caps.get(2).is_some();
        let inner = group_range(caps, if asterisk { 2 } else { 1 });
        let consumed = inner.end + 1;
        ParseSpec::non_terminal(vec![Style::Italic { asterisk }], state, consumed, inner)
    })
    .with_guard(|context: &MatchContext<'_>| {
        !context.remaining().starts_with('_')
            || !context
                .previous_char()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    })
}

/// `~~strikethrough~~`
#[must_use]
pub fn strikethrough_rule() -> Rule {
    Rule::new("strikethrough", STRIKETHROUGH_RE.clone(), |caps, state| {
        ParseSpec::non_terminal(
            vec![Style::Strikethrough],
            state,
            whole(caps),
            group_range(caps, 1),
        )
    })
}

/// `> quote` lines. Never matches inside another quote.
#[must_use]
pub fn quote_rule() -> Rule {
    Rule::new("quote", QUOTE_RE.clone(), |caps, state| {
        let raw_content = group(caps, 1).trim().replace("\n> ", "\n");
        ParseSpec::terminal(Node::styled(Style::Quote { raw_content }), state, whole(caps))
    })
    .block()
    .with_guard(|context: &MatchContext<'_>| !context.state().in_quote)
}

/// `||spoiler||`
#[must_use]
pub fn spoiler_rule() -> Rule {
    Rule::new("spoiler", SPOILER_RE.clone(), |caps, state| {
        let raw_content = group(caps, 1).to_string();
        ParseSpec::terminal(Node::styled(Style::Spoiler { raw_content }), state, whole(caps))
    })
}

/// ```` ```lang\ncode``` ```` or ```` ```lang code``` ````
#[must_use]
pub fn code_block_rule() -> Rule {
    Rule::new("code_block", CODE_BLOCK_RE.clone(), |caps, state| {
        let language = caps.get(1).map(|m| m.as_str().to_string());
        ParseSpec::terminal(
            Node::styled_text(Style::CodeBlock { language }, group(caps, 2)),
            state,
            whole(caps),
        )
    })
}

/// `` `code` ``
#[must_use]
pub fn code_inline_rule() -> Rule {
    Rule::new("code_inline", CODE_INLINE_RE.clone(), |caps, state| {
        ParseSpec::terminal(
            Node::styled_text(Style::CodeInline, group(caps, 1)),
            state,
            whole(caps),
        )
    })
}

/// `<:name:id>` and `<a:name:id>`
#[must_use]
pub fn emoji_rule() -> Rule {
    Rule::new("emoji", EMOJI_RE.clone(), |caps, state| {
        let style = Style::Emoji {
            id: group(caps, 2).to_string(),
            name: group(caps, 1).to_string(),
        };
        ParseSpec::terminal(Node::styled(style), state, whole(caps))
    })
}

fn mention_rule(name: &'static str, pattern: &Regex, kind: MentionKind) -> Rule {
    Rule::new(name, pattern.clone(), move |caps, state| {
        let style = Style::Mention {
            kind,
            id: group(caps, 1).to_string(),
        };
        ParseSpec::terminal(Node::styled(style), state, whole(caps))
    })
}

/// `<#id>`
#[must_use]
pub fn channel_mention_rule() -> Rule {
    mention_rule("channel_mention", &CHANNEL_MENTION_RE, MentionKind::Channel)
}

/// `<@id>` and `<@!id>`
#[must_use]
pub fn user_mention_rule() -> Rule {
    mention_rule("user_mention", &USER_MENTION_RE, MentionKind::User)
}

/// `<@&id>`
#[must_use]
pub fn role_mention_rule() -> Rule {
    mention_rule("role_mention", &ROLE_MENTION_RE, MentionKind::Role)
}

/// Bare `http(s)://` URLs, without trailing punctuation.
#[must_use]
pub fn link_rule() -> Rule {
    Rule::new("link", LINK_RE.clone(), |caps, state| {
        let url = group(caps, 0).to_string();
        ParseSpec::terminal(Node::styled(Style::Link { url }), state, whole(caps))
    })
}

/// Catch-all text, cut before anything another rule might want.
#[must_use]
pub fn text_rule() -> Rule {
    Rule::new("text", TEXT_RE.clone(), |caps, state| {
        let text = group(caps, 1);
        ParseSpec::terminal(Node::text(text), state, text.len())
    })
    .catch_all()
}

/// Escape, newline and the basic emphasis rules.
#[must_use]
pub fn simple_markdown_rules() -> Vec<Rule> {
    vec![
        escape_rule(),
        newline_rule(),
        bold_rule(),
        underline_rule(),
        italic_rule(),
        strikethrough_rule(),
    ]
}

/// Quote, spoiler and code rules. Code blocks come before inline code.
#[must_use]
pub fn style_rules() -> Vec<Rule> {
    vec![
        quote_rule(),
        spoiler_rule(),
        code_block_rule(),
        code_inline_rule(),
    ]
}

/// Emoji and the three mention rules.
#[must_use]
pub fn mention_rules() -> Vec<Rule> {
    vec![
        emoji_rule(),
        channel_mention_rule(),
        user_mention_rule(),
        role_mention_rule(),
    ]
}

/// Every Discord rule in precedence order, optionally ending with the
/// catch-all text rule.
#[must_use]
pub fn discord_rules(include_text: bool) -> Vec<Rule> {
    let mut rules = simple_markdown_rules();
    rules.extend(style_rules());
    rules.extend(mention_rules());
    rules.push(link_rule());
    if include_text {
        rules.push(text_rule());
    }
    rules
}

/// The Discord rules including the catch-all text rule.
#[must_use]
pub fn default_rule_set() -> RuleSet {
    RuleSet::from_trusted(discord_rules(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_rule(rule: &Rule, source: &str) -> Option<ParseSpec> {
        let context = MatchContext::new(source, 0, source.len(), ParseState::default());
        rule.try_match(&context)
            .map(|caps| rule.parse(&caps, ParseState::default()))
    }

    #[test]
    fn test_default_rules_end_with_text() {
        let rules = discord_rules(true);
        assert_eq!(rules.last().map(Rule::name), Some("text"));
        assert_eq!(rules.iter().filter(|rule| rule.is_catch_all()).count(), 1);
        assert!(!discord_rules(false).iter().any(Rule::is_catch_all));
    }

    #[test]
    fn test_bold_consumes_only_delimiters() {
        let spec = try_rule(&bold_rule(), "**bold** rest");
        assert_eq!(
            spec,
            Some(ParseSpec::non_terminal(
                vec![Style::Bold],
                ParseState::default(),
                8,
                2..6
            ))
        );
    }

    #[test]
    fn test_italic_reports_asterisk() {
        let spec = try_rule(&italic_rule(), "*it* x");
        assert_eq!(
            spec,
            Some(ParseSpec::non_terminal(
                vec![Style::Italic { asterisk: true }],
                ParseState::default(),
                4,
                1..3
            ))
        );
        assert!(try_rule(&italic_rule(), "* not italic*").is_none());
    }

    #[test]
    fn test_strikethrough_needs_non_space_edges() {
        assert!(try_rule(&strikethrough_rule(), "~~ x~~").is_none());
        assert!(try_rule(&strikethrough_rule(), "~~x~~").is_some());
    }

    #[test]
    fn test_code_block_without_language() {
        let spec = try_rule(&code_block_rule(), "```hello```");
        assert_eq!(
            spec,
            Some(ParseSpec::terminal(
                Node::styled_text(Style::CodeBlock { language: None }, "hello"),
                ParseState::default(),
                11
            ))
        );
    }

    #[test]
    fn test_code_block_language_before_space() {
        let spec = try_rule(&code_block_rule(), "```py print(1)```");
        assert_eq!(
            spec,
            Some(ParseSpec::terminal(
                Node::styled_text(
                    Style::CodeBlock {
                        language: Some("py".into())
                    },
                    "print(1)"
                ),
                ParseState::default(),
                17
            ))
        );
    }

    #[test]
    fn test_text_stops_before_special_characters() {
        let spec = try_rule(&text_rule(), "plain*rest");
        assert_eq!(
            spec,
            Some(ParseSpec::terminal(
                Node::text("plain"),
                ParseState::default(),
                5
            ))
        );
    }

    #[test]
    fn test_text_always_makes_progress() {
        let spec = try_rule(&text_rule(), "*");
        assert_eq!(spec.map(|spec| spec.consumed()), Some(1));
    }

    #[test]
    fn test_text_keeps_non_ascii_letters() {
        let spec = try_rule(&text_rule(), "héllo wörld 🎉 ok");
        assert_eq!(spec.map(|spec| spec.consumed()), Some("héllo wörld 🎉 ok".len()));
    }

    #[test]
    fn test_link_drops_trailing_punctuation() {
        let spec = try_rule(&link_rule(), "https://example.com/path).");
        assert_eq!(
            spec,
            Some(ParseSpec::terminal(
                Node::styled(Style::Link {
                    url: "https://example.com/path".into()
                }),
                ParseState::default(),
                24
            ))
        );
    }
}

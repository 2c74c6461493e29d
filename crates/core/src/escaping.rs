//! Markdown to escaped markdown.
//!
//! [`DiscordEscapingRenderer`] parses markdown with the Discord rules and
//! writes the tree back out with every delimiter escaped, so Discord shows the
//! input literally instead of formatting it.

use reserializer_common::ReserializerResult;
use reserializer_markdown::{
    Node, ParseState, RuleSet, Style, default_rule_set, escape_markdown, parse,
};

use crate::minecraft::MinecraftSerializerOptions;

/// Escaped form of the quote marker, written at the start of every quoted line.
pub const ESCAPED_QUOTE: &str = r"\> ";

/// Renderer from markdown to escaped markdown.
#[derive(Debug, Clone)]
pub struct DiscordEscapingRenderer {
    rules: RuleSet,
    debug: bool,
}

impl Default for DiscordEscapingRenderer {
    fn default() -> Self {
        Self::defaults()
    }
}

impl DiscordEscapingRenderer {
    /// Escape using `rules` to recognise the markdown.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            debug: false,
        }
    }

    /// The Discord rules with the catch-all text rule.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(default_rule_set())
    }

    /// Escape with the rules and debug flag of serializer options.
    #[must_use]
    pub fn from_options(options: &MinecraftSerializerOptions) -> Self {
        Self::new(options.rules().clone()).with_debug(options.debug())
    }

    /// Returns a copy that traces every rule application.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Escape every markdown construct in `markdown`.
    pub fn escape(&self, markdown: &str) -> ReserializerResult<String> {
        let escaped = self.escape_with(markdown, ParseState::default())?;
        tracing::trace!(
            input_len = markdown.len(),
            output_len = escaped.len(),
            "Escaped markdown"
        );
        Ok(escaped)
    }

    fn escape_with(&self, markdown: &str, state: ParseState) -> ReserializerResult<String> {
        let nodes = parse(markdown, state, &self.rules, self.debug)?;
        let mut output = String::with_capacity(markdown.len() * 2);
        for node in &nodes {
            self.render(&mut output, node, state)?;
        }
        Ok(output)
    }

    fn render(
        &self,
        output: &mut String,
        node: &Node,
        state: ParseState,
    ) -> ReserializerResult<()> {
        match node {
            Node::Text { content } => output.push_str(&escape_markdown(content)),
            Node::Style { styles, children } => {
                for style in styles {
                    self.render_style(output, style, state)?;
                }
                for child in children {
                    self.render(output, child, state)?;
                }
                for style in styles.iter().rev() {
                    output.push_str(delimiter(style).unwrap_or_default());
                }
            }
        }
        Ok(())
    }

    fn render_style(
        &self,
        output: &mut String,
        style: &Style,
        state: ParseState,
    ) -> ReserializerResult<()> {
        match style {
            Style::Quote { raw_content } => {
                let content = self.escape_with(raw_content, ParseState::quoted())?;
                output.push_str(ESCAPED_QUOTE);
                output.push_str(&content.replace('\n', &format!("\n{ESCAPED_QUOTE}")));
            }
            Style::Spoiler { raw_content } => {
                output.push_str(delimiter(style).unwrap_or_default());
                output.push_str(&self.escape_with(raw_content, state)?);
            }
            Style::CodeBlock { language } => {
                output.push_str(delimiter(style).unwrap_or_default());
                if let Some(language) = language {
                    output.push_str(&escape_markdown(language));
                    output.push('\n');
                }
            }
            Style::Link { url } => output.push_str(url),
            Style::Mention { kind, id } => output.push_str(&kind.markdown(id)),
            Style::Emoji { id, name } => output.push_str(&format!("<:{name}:{id}>")),
            _ => output.push_str(delimiter(style).unwrap_or_default()),
        }
        Ok(())
    }
}

/// Escaped delimiter written on both sides of the node's children.
const fn delimiter(style: &Style) -> Option<&'static str> {
    match style {
        Style::Bold => Some(r"\*\*"),
        Style::Italic { asterisk: true } => Some(r"\*"),
        Style::Italic { asterisk: false } => Some(r"\_"),
        Style::Underline => Some(r"\_\_"),
        Style::Strikethrough => Some(r"\~\~"),
        Style::Spoiler { .. } => Some(r"\|\|"),
        Style::CodeBlock { .. } => Some(r"\`\`\`"),
        Style::CodeInline => Some(r"\`"),
        Style::Quote { .. } | Style::Link { .. } | Style::Mention { .. } | Style::Emoji { .. } => {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reserializer_markdown::text_rule;

    use super::*;

    fn escape(markdown: &str) -> String {
        DiscordEscapingRenderer::defaults().escape(markdown).unwrap()
    }

    #[test]
    fn test_emphasis_delimiters() {
        assert_eq!(escape("**bold**"), r"\*\*bold\*\*");
        assert_eq!(escape("*italic*"), r"\*italic\*");
        assert_eq!(escape("_italic_"), r"\_italic\_");
        assert_eq!(escape("__underline__"), r"\_\_underline\_\_");
        assert_eq!(escape("~~strike~~"), r"\~\~strike\~\~");
    }

    #[test]
    fn test_spoiler_and_code() {
        assert_eq!(escape("||secret||"), r"\|\|secret\|\|");
        assert_eq!(escape("`code`"), r"\`code\`");
        assert_eq!(escape("```rust\nlet x```"), "\\`\\`\\`rust\nlet x\\`\\`\\`");
    }

    #[test]
    fn test_code_content_is_escaped() {
        assert_eq!(escape("`**raw**`"), r"\`\*\*raw\*\*\`");
    }

    /// The quote marker is written once per line and never closed.
    #[test]
    fn test_quote_lines() {
        assert_eq!(escape("> quoted\n> more"), "\\> quoted\n\\> more");
    }

    #[test]
    fn test_quote_in_spoiler_in_quote() {
        assert_eq!(escape("> ||> inner||"), r"\> \|\|> inner\|\|");
    }

    #[test]
    fn test_nested_styles() {
        assert_eq!(escape("**bold _it_**"), r"\*\*bold \_it\_\*\*");
    }

    #[test]
    fn test_mentions_and_links_are_kept() {
        assert_eq!(
            escape("hi <@1> <#2> <:wave:3> https://example.com/a_b"),
            "hi <@1> <#2> <:wave:3> https://example.com/a_b"
        );
    }

    #[test]
    fn test_escaped_input_stays_escaped() {
        assert_eq!(escape(r"\*not bold\*"), r"\*not bold\*");
    }

    #[test]
    fn test_text_only_rules_escape_every_character() {
        let rules = RuleSet::new(vec![text_rule()]).unwrap();
        let escaped = DiscordEscapingRenderer::new(rules).escape("**x**").unwrap();
        assert_eq!(escaped, r"\*\*x\*\*");
    }

    #[test]
    fn test_from_options() {
        let options = MinecraftSerializerOptions::defaults().with_debug(true);
        let renderer = DiscordEscapingRenderer::from_options(&options);
        assert!(renderer.debug);
        assert_eq!(renderer.escape("~~x~~").unwrap(), r"\~\~x\~\~");
    }
}

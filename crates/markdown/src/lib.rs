//! Discord flavoured markdown parser.
//!
//! This crate turns chat markdown into a small style-annotated AST. The
//! parser is rule based: an ordered [`RuleSet`] is tried at every position
//! and the first matching [`Rule`] decides what the next node is.
//!
//! # Features
//!
//! - **Parsing**: Convert markdown to an AST via [`parse`]
//! - **Rules**: The built-in Discord rules via [`default_rule_set`] and [`discord_rules`],
//!   custom rules via [`Rule::from_pattern`]
//! - **Escaping**: Neutralise markdown in plain text via [`escape_markdown`]
//!
//! # Example
//!
//! ```
//! use reserializer_markdown::{Node, ParseState, Style, default_rule_set, parse};
//!
//! # fn main() -> Result<(), reserializer_common::ReserializerError> {
//! let nodes = parse("Hello **world**", ParseState::default(), &default_rule_set(), false)?;
//! assert_eq!(nodes[0], Node::text("Hello "));
//! assert_eq!(nodes[1].styles(), &[Style::Bold]);
//! # Ok(())
//! # }
//! ```

mod escape;
mod node;
mod parser;
mod rule;
mod rules;
mod style;

pub use escape::{SPECIAL_CHARACTERS, ends_with_url, escape_markdown, escape_outside_urls};
pub use node::{Node, merge_text_nodes};
pub use parser::parse;
pub use rule::{MatchContext, ParseSpec, ParseState, Rule, RuleSet};
pub use rules::{
    bold_rule, channel_mention_rule, code_block_rule, code_inline_rule, default_rule_set,
    discord_rules, emoji_rule, escape_rule, italic_rule, link_rule, mention_rules,
    newline_rule, quote_rule, role_mention_rule, simple_markdown_rules, spoiler_rule,
    strikethrough_rule, style_rules, text_rule, underline_rule, user_mention_rule,
};
pub use style::{MentionKind, Style};

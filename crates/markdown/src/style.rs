//! Formatting instructions attached to AST nodes.

use serde::{Deserialize, Serialize};

/// What a mention points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MentionKind {
    /// `<@&id>`
    Role,
    /// `<@id>` or `<@!id>`
    User,
    /// `<#id>`
    Channel,
}

impl MentionKind {
    /// The markdown that mentions `id`.
    #[must_use]
    pub fn markdown(self, id: &str) -> String {
        match self {
            Self::Role => format!("<@&{id}>"),
            Self::User => format!("<@{id}>"),
            Self::Channel => format!("<#{id}>"),
        }
    }
}

/// A formatting instruction.
///
/// `Quote` and `Spoiler` keep their raw markdown; it is parsed again when the
/// node is rendered. `CodeInline` and `CodeBlock` nodes hold their literal
/// text as a single text child that is never parsed. `Link`, `Mention` and
/// `Emoji` nodes never have children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "props", rename_all = "camelCase")]
pub enum Style {
    /// `**text**`
    Bold,

    /// `*text*` or `_text_`.
    Italic {
        /// Whether the asterisk form was used.
        asterisk: bool,
    },

    /// `__text__`
    Underline,

    /// `~~text~~`
    Strikethrough,

    /// `` `code` ``
    CodeInline,

    /// ```` ```lang\ncode``` ````
    CodeBlock {
        /// Language tag after the opening fence.
        language: Option<String>,
    },

    /// `> text`, one marker per line.
    Quote {
        /// Quoted markdown with the line markers removed.
        raw_content: String,
    },

    /// `||text||`
    Spoiler {
        /// Markdown between the bars.
        raw_content: String,
    },

    /// A bare URL.
    Link {
        /// The URL.
        url: String,
    },

    /// A role, user or channel mention.
    Mention {
        /// What is mentioned.
        kind: MentionKind,
        /// Snowflake ID.
        id: String,
    },

    /// A custom emoji, `<:name:id>`.
    Emoji {
        /// Snowflake ID.
        id: String,
        /// Emoji name.
        name: String,
    },
}

impl Style {
    /// Stable upper-case name, used in debug traces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic { .. } => "ITALICS",
            Self::Underline => "UNDERLINE",
            Self::Strikethrough => "STRIKETHROUGH",
            Self::CodeInline => "CODE_STRING",
            Self::CodeBlock { .. } => "CODE_BLOCK",
            Self::Quote { .. } => "QUOTE",
            Self::Spoiler { .. } => "SPOILER",
            Self::Link { .. } => "LINK",
            Self::Mention {
                kind: MentionKind::Role,
                ..
            } => "ROLE_MENTION",
            Self::Mention {
                kind: MentionKind::User,
                ..
            } => "USER_MENTION",
            Self::Mention {
                kind: MentionKind::Channel,
                ..
            } => "CHANNEL_MENTION",
            Self::Emoji { .. } => "EMOJI_MENTION",
        }
    }

    /// Returns whether nodes carrying this style are always leaves.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Link { .. } | Self::Mention { .. } | Self::Emoji { .. }
        )
    }
}

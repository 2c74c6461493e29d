//! Markdown AST nodes.

use serde::{Deserialize, Serialize};

use crate::style::Style;

/// Node in the markdown AST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props", rename_all = "camelCase")]
pub enum Node {
    /// Plain text.
    Text {
        /// The text.
        content: String,
    },

    /// Styled children.
    Style {
        /// Styles applied to every child, outermost first.
        styles: Vec<Style>,
        /// Child nodes.
        children: Vec<Node>,
    },
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Create a style node with a single style and no children.
    #[must_use]
    pub fn styled(style: Style) -> Self {
        Self::Style {
            styles: vec![style],
            children: Vec::new(),
        }
    }

    /// Create a style node whose only child is literal text.
    #[must_use]
    pub fn styled_text(style: Style, content: impl Into<String>) -> Self {
        Self::Style {
            styles: vec![style],
            children: vec![Self::text(content)],
        }
    }

    /// Get the node kind as a string.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Style { .. } => "style",
        }
    }

    /// The styles of this node; empty for text.
    #[must_use]
    pub fn styles(&self) -> &[Style] {
        match self {
            Self::Text { .. } => &[],
            Self::Style { styles, .. } => styles,
        }
    }

    /// The children of this node; empty for text.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Text { .. } => &[],
            Self::Style { children, .. } => children,
        }
    }

    /// The content of a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            Self::Style { .. } => None,
        }
    }
}

/// Merge directly adjacent text nodes, at every depth.
///
/// Escapes and other single-character matches leave runs of tiny text nodes
/// behind; merging them keeps the tree small without changing its meaning.
#[must_use]
pub fn merge_text_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text { content } => {
                if let Some(Node::Text { content: previous }) = merged.last_mut() {
                    previous.push_str(&content);
                } else {
                    merged.push(Node::Text { content });
                }
            }
            Node::Style { styles, children } => merged.push(Node::Style {
                styles,
                children: merge_text_nodes(children),
            }),
        }
    }
    merged
}

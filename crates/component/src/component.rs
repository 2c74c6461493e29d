//! The rich-text component tree.

use serde::{Deserialize, Serialize};

use crate::event::{ClickEvent, HoverEvent};
use crate::format::{Decoration, NamedColor, TriState};

/// What a component displays before its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentContent {
    /// Translation key, resolved by the client.
    Translatable {
        /// Translation key.
        translate: String,
        /// Arguments substituted into the translation.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        with: Vec<Component>,
    },
    /// Key binding, resolved by the client.
    Keybind {
        /// Key binding identifier, e.g. `key.jump`.
        keybind: String,
    },
    /// Scoreboard value.
    Score {
        /// Score holder and objective.
        score: Score,
    },
    /// Entity selector.
    Selector {
        /// Selector pattern, e.g. `@p`.
        selector: String,
    },
    /// Literal text.
    Text {
        /// The text.
        #[serde(default)]
        text: String,
    },
}

impl Default for ComponentContent {
    fn default() -> Self {
        Self::Text {
            text: String::new(),
        }
    }
}

/// A scoreboard reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Score holder.
    pub name: String,
    /// Objective name.
    pub objective: String,
    /// Resolved value, when the server already filled it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A node of a rich-text tree.
///
/// Components are built bottom-up and own their children. Decorations left
/// [`TriState::NotSet`] inherit the value of the nearest ancestor that sets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(flatten)]
    content: ComponentContent,
    #[serde(default, skip_serializing_if = "TriState::is_not_set")]
    bold: TriState,
    #[serde(default, skip_serializing_if = "TriState::is_not_set")]
    italic: TriState,
    #[serde(default, skip_serializing_if = "TriState::is_not_set")]
    underlined: TriState,
    #[serde(default, skip_serializing_if = "TriState::is_not_set")]
    strikethrough: TriState,
    #[serde(default, skip_serializing_if = "TriState::is_not_set")]
    obfuscated: TriState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<NamedColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    click_event: Option<ClickEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hover_event: Option<HoverEvent>,
    #[serde(default, rename = "extra", skip_serializing_if = "Vec::is_empty")]
    children: Vec<Component>,
}

impl Component {
    /// An empty text component.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A literal text component.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::empty().with_content(ComponentContent::Text { text: text.into() })
    }

    /// A key binding component.
    #[must_use]
    pub fn keybind(keybind: impl Into<String>) -> Self {
        Self::empty().with_content(ComponentContent::Keybind {
            keybind: keybind.into(),
        })
    }

    /// A translatable component without arguments.
    #[must_use]
    pub fn translatable(key: impl Into<String>) -> Self {
        Self::translatable_with(key, Vec::new())
    }

    /// A translatable component with arguments.
    #[must_use]
    pub fn translatable_with(key: impl Into<String>, args: Vec<Self>) -> Self {
        Self::empty().with_content(ComponentContent::Translatable {
            translate: key.into(),
            with: args,
        })
    }

    /// A scoreboard component.
    #[must_use]
    pub fn score(
        name: impl Into<String>,
        objective: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::empty().with_content(ComponentContent::Score {
            score: Score {
                name: name.into(),
                objective: objective.into(),
                value,
            },
        })
    }

    /// An entity selector component.
    #[must_use]
    pub fn selector(pattern: impl Into<String>) -> Self {
        Self::empty().with_content(ComponentContent::Selector {
            selector: pattern.into(),
        })
    }

    /// The content shown before the children.
    #[must_use]
    pub const fn content(&self) -> &ComponentContent {
        &self.content
    }

    /// The literal text, if this is a text component.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            ComponentContent::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Replace the content.
    #[must_use]
    pub fn with_content(mut self, content: ComponentContent) -> Self {
        self.content = content;
        self
    }

    /// The state of a decoration on this component alone.
    #[must_use]
    pub const fn decoration(&self, decoration: Decoration) -> TriState {
        match decoration {
            Decoration::Bold => self.bold,
            Decoration::Italic => self.italic,
            Decoration::Underlined => self.underlined,
            Decoration::Strikethrough => self.strikethrough,
            Decoration::Obfuscated => self.obfuscated,
        }
    }

    /// Set the state of a decoration.
    pub fn set_decoration(&mut self, decoration: Decoration, state: TriState) {
        let slot = match decoration {
            Decoration::Bold => &mut self.bold,
            Decoration::Italic => &mut self.italic,
            Decoration::Underlined => &mut self.underlined,
            Decoration::Strikethrough => &mut self.strikethrough,
            Decoration::Obfuscated => &mut self.obfuscated,
        };
        *slot = state;
    }

    /// Set the state of a decoration.
    #[must_use]
    pub fn with_decoration(mut self, decoration: Decoration, state: TriState) -> Self {
        self.set_decoration(decoration, state);
        self
    }

    /// Enable a decoration.
    #[must_use]
    pub fn decorate(self, decoration: Decoration) -> Self {
        self.with_decoration(decoration, TriState::True)
    }

    /// The colour of this component, if set.
    #[must_use]
    pub const fn color(&self) -> Option<NamedColor> {
        self.color
    }

    /// Set the colour.
    #[must_use]
    pub const fn with_color(mut self, color: NamedColor) -> Self {
        self.color = Some(color);
        self
    }

    /// The click event, if any.
    #[must_use]
    pub const fn click_event(&self) -> Option<&ClickEvent> {
        self.click_event.as_ref()
    }

    /// Set the click event.
    #[must_use]
    pub fn with_click_event(mut self, event: ClickEvent) -> Self {
        self.click_event = Some(event);
        self
    }

    /// The hover event, if any.
    #[must_use]
    pub const fn hover_event(&self) -> Option<&HoverEvent> {
        self.hover_event.as_ref()
    }

    /// Set the hover event.
    #[must_use]
    pub fn with_hover_event(mut self, event: HoverEvent) -> Self {
        self.hover_event = Some(event);
        self
    }

    /// The children, in display order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Append a child.
    pub fn push(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Append a child.
    #[must_use]
    pub fn append(mut self, child: Self) -> Self {
        self.push(child);
        self
    }

    /// Replace all children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Returns whether the component shows nothing of its own and has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && matches!(&self.content, ComponentContent::Text { text } if text.is_empty())
    }

    /// The flattened text of the tree, ignoring styling and hover payloads.
    ///
    /// Non-literal content falls back to its raw identifier (keybind name,
    /// translation key, selector pattern) or the resolved score value.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(&mut out);
        out
    }

    fn write_plain_text(&self, out: &mut String) {
        match &self.content {
            ComponentContent::Text { text } => out.push_str(text),
            ComponentContent::Keybind { keybind } => out.push_str(keybind),
            ComponentContent::Translatable { translate, .. } => out.push_str(translate),
            ComponentContent::Score { score } => {
                out.push_str(score.value.as_deref().unwrap_or_default());
            }
            ComponentContent::Selector { selector } => out.push_str(selector),
        }
        for child in &self.children {
            child.write_plain_text(out);
        }
    }

    /// Replace every occurrence of `pattern` in the literal text of this tree.
    ///
    /// A text content containing the pattern keeps the part before the first
    /// occurrence; each occurrence becomes a copy of `replacement` followed by
    /// the next segment as a plain text child, inserted ahead of the existing
    /// children so the displayed order is preserved. Hover payloads are left
    /// untouched.
    #[must_use]
    pub fn replace_text(&self, pattern: &str, replacement: &Self) -> Self {
        let mut inserted = Vec::new();
        let mut content = self.content.clone();

        if let ComponentContent::Text { text } = &self.content {
            if !pattern.is_empty() && text.contains(pattern) {
                let mut segments = text.split(pattern);
                let head = segments.next().unwrap_or_default().to_string();
                for segment in segments {
                    inserted.push(replacement.clone());
                    if !segment.is_empty() {
                        inserted.push(Self::text(segment));
                    }
                }
                content = ComponentContent::Text { text: head };
            }
        }

        let children = inserted
            .into_iter()
            .chain(
                self.children
                    .iter()
                    .map(|child| child.replace_text(pattern, replacement)),
            )
            .collect();

        Self {
            content,
            children,
            ..self.shallow_clone()
        }
    }

    fn shallow_clone(&self) -> Self {
        Self {
            content: ComponentContent::default(),
            bold: self.bold,
            italic: self.italic,
            underlined: self.underlined,
            strikethrough: self.strikethrough,
            obfuscated: self.obfuscated,
            color: self.color,
            click_event: self.click_event.clone(),
            hover_event: self.hover_event.clone(),
            children: Vec::new(),
        }
    }
}

impl From<&str> for Component {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Component {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

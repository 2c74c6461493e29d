//! Click and hover events.

use serde::{Deserialize, Serialize};

use crate::Component;

/// Action performed when a component is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ClickEvent {
    /// Open a URL in the browser.
    OpenUrl(String),
    /// Run a chat command.
    RunCommand(String),
    /// Put a command into the chat input.
    SuggestCommand(String),
    /// Copy a value to the clipboard.
    CopyToClipboard(String),
}

impl ClickEvent {
    /// Create an open-url click event.
    #[must_use]
    pub fn open_url(url: impl Into<String>) -> Self {
        Self::OpenUrl(url.into())
    }

    /// The URL this event opens, if it is an open-url event.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::OpenUrl(url) => Some(url),
            _ => None,
        }
    }
}

/// Payload shown when hovering over a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "contents", rename_all = "snake_case")]
pub enum HoverEvent {
    /// Show another component tree.
    ShowText(Box<Component>),
}

impl HoverEvent {
    /// Create a show-text hover event.
    #[must_use]
    pub fn show_text(component: Component) -> Self {
        Self::ShowText(Box::new(component))
    }
}

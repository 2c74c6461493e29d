//! Options for the component to markdown direction.

use std::fmt;
use std::sync::Arc;

use reserializer_common::DiscordSettings;
use reserializer_component::Component;

/// Resolves a keybind identifier (e.g. `key.jump`) to display text.
pub type KeybindProvider = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Resolves a translation key and its arguments to display text.
pub type TranslationProvider = Arc<dyn Fn(&str, &[Component]) -> String + Send + Sync>;

/// Options for [`DiscordSerializer`](super::DiscordSerializer).
#[derive(Clone)]
pub struct DiscordSerializerOptions {
    masked_links: bool,
    escape_markdown: bool,
    keybind_provider: KeybindProvider,
    translation_provider: TranslationProvider,
}

impl DiscordSerializerOptions {
    /// Escaping on, masked links off, keybinds and translations written as
    /// their raw identifiers.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            masked_links: false,
            escape_markdown: true,
            keybind_provider: Arc::new(str::to_string),
            translation_provider: Arc::new(|key: &str, _: &[Component]| key.to_string()),
        }
    }

    /// Defaults adjusted by loaded settings.
    #[must_use]
    pub fn from_settings(settings: &DiscordSettings) -> Self {
        Self::defaults()
            .with_masked_links(settings.masked_links)
            .with_escape_markdown(settings.escape_markdown)
    }

    /// Whether open-url click events become `[text](<url>)`.
    #[must_use]
    pub const fn masked_links(&self) -> bool {
        self.masked_links
    }

    /// Whether markdown characters in content are escaped.
    #[must_use]
    pub const fn escape_markdown(&self) -> bool {
        self.escape_markdown
    }

    /// Resolve a keybind identifier.
    #[must_use]
    pub fn resolve_keybind(&self, keybind: &str) -> String {
        (self.keybind_provider)(keybind)
    }

    /// Resolve a translation key.
    #[must_use]
    pub fn resolve_translation(&self, key: &str, args: &[Component]) -> String {
        (self.translation_provider)(key, args)
    }

    /// Returns a copy with masked links switched on or off.
    #[must_use]
    pub fn with_masked_links(&self, masked_links: bool) -> Self {
        Self {
            masked_links,
            ..self.clone()
        }
    }

    /// Returns a copy with escaping switched on or off.
    #[must_use]
    pub fn with_escape_markdown(&self, escape_markdown: bool) -> Self {
        Self {
            escape_markdown,
            ..self.clone()
        }
    }

    /// Returns a copy resolving keybinds with `provider`.
    #[must_use]
    pub fn with_keybind_provider<F>(&self, provider: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            keybind_provider: Arc::new(provider),
            ..self.clone()
        }
    }

    /// Returns a copy resolving translations with `provider`.
    #[must_use]
    pub fn with_translation_provider<F>(&self, provider: F) -> Self
    where
        F: Fn(&str, &[Component]) -> String + Send + Sync + 'static,
    {
        Self {
            translation_provider: Arc::new(provider),
            ..self.clone()
        }
    }
}

impl Default for DiscordSerializerOptions {
    fn default() -> Self {
        Self::defaults()
    }
}

impl fmt::Debug for DiscordSerializerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordSerializerOptions")
            .field("masked_links", &self.masked_links)
            .field("escape_markdown", &self.escape_markdown)
            .finish_non_exhaustive()
    }
}

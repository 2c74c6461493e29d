//! Options for the markdown to component direction.

use std::fmt;

use reserializer_common::{MinecraftSettings, ReserializerError, ReserializerResult};
use reserializer_markdown::{RuleSet, default_rule_set};

use super::renderer::{DefaultMinecraftRenderer, SharedRenderer};

/// Options for [`MinecraftSerializer`](super::MinecraftSerializer).
///
/// Options are immutable: every modifier returns a new value and leaves the
/// original untouched.
#[derive(Clone)]
pub struct MinecraftSerializerOptions {
    rules: RuleSet,
    renderers: Vec<SharedRenderer>,
    debug: bool,
}

impl MinecraftSerializerOptions {
    /// The Discord rules with the catch-all text rule, no custom renderers
    /// and debug tracing off.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            rules: default_rule_set(),
            renderers: Vec::new(),
            debug: false,
        }
    }

    /// Defaults adjusted by loaded settings.
    #[must_use]
    pub fn from_settings(settings: &MinecraftSettings) -> Self {
        Self::defaults().with_debug(settings.debug)
    }

    /// Rules used for parsing.
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Custom renderers, in the order they are consulted.
    #[must_use]
    pub fn renderers(&self) -> &[SharedRenderer] {
        &self.renderers
    }

    /// Whether every rule application is traced.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns a copy parsing with `rules`.
    #[must_use]
    pub fn with_rules(&self, rules: RuleSet) -> Self {
        Self {
            rules,
            ..self.clone()
        }
    }

    /// Returns a copy with debug tracing switched on or off.
    #[must_use]
    pub fn with_debug(&self, debug: bool) -> Self {
        Self {
            debug,
            ..self.clone()
        }
    }

    /// Returns a copy with `renderer` consulted after the existing ones.
    pub fn add_renderer(&self, renderer: SharedRenderer) -> ReserializerResult<Self> {
        self.add_renderer_at(self.renderers.len(), renderer)
    }

    /// Returns a copy with `renderer` inserted at `index` of the chain.
    pub fn add_renderer_at(
        &self,
        index: usize,
        renderer: SharedRenderer,
    ) -> ReserializerResult<Self> {
        let name = renderer.name();
        if name == DefaultMinecraftRenderer::NAME {
            return Err(ReserializerError::Configuration(
                "the default renderer is always registered".to_string(),
            ));
        }
        if self.has_renderer(name) {
            return Err(ReserializerError::DuplicateRenderer(name.to_string()));
        }
        if index > self.renderers.len() {
            return Err(ReserializerError::Configuration(format!(
                "renderer index {index} is out of range for {} renderers",
                self.renderers.len()
            )));
        }

        tracing::debug!(renderer = name, index, "Registered renderer");
        let mut renderers = self.renderers.clone();
        renderers.insert(index, renderer);
        Ok(Self {
            renderers,
            ..self.clone()
        })
    }

    /// Returns a copy without the renderer called `name`.
    pub fn remove_renderer(&self, name: &str) -> ReserializerResult<Self> {
        let index = self
            .renderers
            .iter()
            .position(|renderer| renderer.name() == name)
            .ok_or_else(|| ReserializerError::RendererNotFound(name.to_string()))?;

        let mut renderers = self.renderers.clone();
        renderers.remove(index);
        Ok(Self {
            renderers,
            ..self.clone()
        })
    }

    /// Returns whether a renderer called `name` is registered.
    #[must_use]
    pub fn has_renderer(&self, name: &str) -> bool {
        self.renderers.iter().any(|renderer| renderer.name() == name)
    }
}

impl Default for MinecraftSerializerOptions {
    fn default() -> Self {
        Self::defaults()
    }
}

impl fmt::Debug for MinecraftSerializerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let renderers: Vec<&str> = self.renderers.iter().map(|r| r.name()).collect();
        f.debug_struct("MinecraftSerializerOptions")
            .field("rules", &self.rules.len())
            .field("renderers", &renderers)
            .field("debug", &self.debug)
            .finish()
    }
}

//! Serializer configuration.

use serde::Deserialize;
use std::path::Path;

/// Serializer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Component to markdown direction.
    #[serde(default)]
    pub discord: DiscordSettings,
    /// Markdown to component direction.
    #[serde(default)]
    pub minecraft: MinecraftSettings,
}

/// Settings for serializing components into Discord markdown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscordSettings {
    /// Escape Discord formatting characters found in component content.
    #[serde(default = "default_true")]
    pub escape_markdown: bool,
    /// Emit `[text](<url>)` for open-url click events.
    #[serde(default)]
    pub masked_links: bool,
}

/// Settings for serializing Discord markdown into components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MinecraftSettings {
    /// Trace every rule application while parsing.
    #[serde(default)]
    pub debug: bool,
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            escape_markdown: true,
            masked_links: false,
        }
    }
}

const fn default_true() -> bool {
    true
}

impl Settings {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/reserializer.toml`
    /// 2. Environment variables with `RESERIALIZER_` prefix
    ///    (e.g. `RESERIALIZER__DISCORD__MASKED_LINKS=true`)
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/reserializer").required(false))
            .add_source(environment())
            .build()?;

        let settings: Self = config.try_deserialize()?;
        tracing::debug!(?settings, "Loaded reserializer settings");
        Ok(settings)
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a TOML string, ignoring the environment.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("RESERIALIZER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

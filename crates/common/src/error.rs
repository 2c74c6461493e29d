//! Error types for the reserializer.

use thiserror::Error;

/// Reserializer result type.
pub type ReserializerResult<T> = Result<T, ReserializerError>;

/// Reserializer error type.
///
/// Malformed markdown or unresolved component content is never an error;
/// every variant here points at a broken configuration or a misbehaving rule.
#[derive(Debug, Error)]
pub enum ReserializerError {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Renderer already registered: {0}")]
    DuplicateRenderer(String),

    #[error("Renderer not registered: {0}")]
    RendererNotFound(String),

    // === Parse Errors ===
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Rule `{rule}` produced an empty match at offset {offset}")]
    ZeroLengthMatch { rule: String, offset: usize },

    #[error("No rule matched at offset {0}")]
    NoRuleMatched(usize),

    // === Other ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReserializerError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::DuplicateRenderer(_) => "DUPLICATE_RENDERER",
            Self::RendererNotFound(_) => "RENDERER_NOT_FOUND",
            Self::Parse(_) => "PARSE_ERROR",
            Self::ZeroLengthMatch { .. } => "ZERO_LENGTH_MATCH",
            Self::NoRuleMatched(_) => "NO_RULE_MATCHED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error was caused by how the serializers were set up
    /// rather than by a rule misbehaving during a parse.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::DuplicateRenderer(_)
                | Self::RendererNotFound(_)
                | Self::NoRuleMatched(_)
        )
    }
}

// === From implementations ===

impl From<config::ConfigError> for ReserializerError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

//! Error types for the resolution engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, FakerError>;

/// Errors surfaced by fetching, expansion and pattern generation.
#[derive(Debug, Error)]
pub enum FakerError {
    /// The locale tag could not be parsed.
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// No data exists for the requested locale.
    #[error("Locale {0} is not supported: no locale data found")]
    LocaleUnsupported(String),

    /// A required key is absent in every locale of the chain.
    #[error("Key not found: {key} (searched {chain})")]
    KeyNotFound { key: String, chain: String },

    /// A directive could not be mapped to data or an operation, or its operation failed.
    ///
    /// `directive` holds the full token, `#{...}` included.
    #[error("Unable to resolve {directive} directive.")]
    UnresolvedDirective { directive: String },

    /// Nested expansion went past the configured depth.
    #[error("Expansion of {directive} exceeded the maximum depth of {limit}")]
    ExpansionTooDeep { directive: String, limit: usize },

    /// A regexify pattern uses syntax outside the supported subset.
    #[error("Invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Locale data contains a node that is neither a scalar, a list of scalars nor a map.
    #[error("Malformed locale data at {key}: {message}")]
    MalformedData { key: String, message: String },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl FakerError {
    /// Create an unresolved-directive error for the given token.
    pub fn unresolved(directive: impl Into<String>) -> Self {
        FakerError::UnresolvedDirective {
            directive: directive.into(),
        }
    }

    /// Create an invalid-pattern error.
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        FakerError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-data error.
    pub fn malformed(key: impl Into<String>, message: impl Into<String>) -> Self {
        FakerError::MalformedData {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Errors raised inside an operation body.
///
/// The expander folds everything except [`FakerError::ExpansionTooDeep`]
/// into [`FakerError::UnresolvedDirective`] for the directive that called
/// the operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Wrong number of arguments.
    #[error("expected {expected} argument(s), got {got}")]
    Arity { expected: String, got: usize },

    /// An argument could not be converted to the declared type.
    #[error("argument {index} ({value:?}) is not a valid {expected}")]
    InvalidArgument {
        index: usize,
        value: String,
        expected: &'static str,
    },

    /// The operation itself failed.
    #[error("{0}")]
    Failed(String),

    /// The operation called back into the engine and that call failed.
    #[error(transparent)]
    Faker(#[from] FakerError),
}

impl OperationError {
    /// Create a generic failure.
    pub fn failed(message: impl Into<String>) -> Self {
        OperationError::Failed(message.into())
    }
}

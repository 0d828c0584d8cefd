//! Error types.
//!
//! Behaviors themselves never fail: a missing element is an [`crate::behavior::Attach::Absent`]
//! outcome, not an error. Errors only arise at the edges, when configuration
//! is loaded or when the browser host talks to the DOM.

/// A selector string that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector `{input}`: {reason}")]
pub struct SelectorError {
    pub input: String,
    pub reason: String,
}

/// Configuration that could not be loaded or is out of range.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document was malformed or had the wrong shape.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// An intersection threshold outside `0.0..=1.0`.
    #[error("{field} must be within 0.0..=1.0, got {value}")]
    Threshold { field: &'static str, value: f64 },

    /// A delay or duration of zero where a positive value is required.
    #[error("{field} must be positive")]
    ZeroDuration { field: &'static str },

    /// A validation pattern failed to compile.
    #[error("pattern is invalid: {0}")]
    Pattern(#[from] regex::Error),

    /// A configured selector did not parse.
    #[error("selector `{field}` is invalid: {source}")]
    Selector {
        field: &'static str,
        #[source]
        source: SelectorError,
    },
}

/// Top-level error for booting behaviors and hosting them in a browser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A DOM call in the browser host failed.
    #[error("host call failed: {0}")]
    Host(String),
}

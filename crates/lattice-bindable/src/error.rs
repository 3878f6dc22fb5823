//! Error types for bindable models.
//!
//! Validation failures are not errors: they are recorded in the model's error
//! ledger. This type only covers mistakes made while declaring rules.

/// Result type alias for rule construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building validation rules.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pattern rule was given an invalid regular expression.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A range rule was declared with `minimum > maximum`.
    #[error("Invalid range: minimum {minimum} is greater than maximum {maximum}")]
    InvalidRange { minimum: f64, maximum: f64 },

    /// A length rule was declared with `minimum > maximum`.
    #[error("Invalid length bounds: minimum {minimum} is greater than maximum {maximum}")]
    InvalidLength { minimum: usize, maximum: usize },

    /// A rule was registered without a property name.
    #[error("Validation rule registered with an empty property name")]
    EmptyPropertyName,
}

impl Error {
    /// Create a pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}

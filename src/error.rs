//! Error types for the analysis engine

use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = core::result::Result<T, AnalysisError>;

/// Errors raised by the analysis engine.
///
/// Every error is local and deterministic: retrying the same call with the
/// same arguments fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// An argument is out of range, or a request cannot be satisfied
    /// (e.g. the mean length of zero words).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unsmoothed IDF was requested for a word absent from every document.
    #[error("division by zero: word {word:?} has document frequency 0")]
    DivisionByZero {
        /// The word whose document frequency is zero
        word: String,
    },

    /// A document title or word was looked up but never registered.
    #[error("missing key: {0}")]
    MissingKey(String),
}

impl AnalysisError {
    /// Shorthand for [`AnalysisError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Shorthand for [`AnalysisError::MissingKey`].
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingKey(key.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let err = AnalysisError::DivisionByZero { word: "holmes".to_string() };
        assert!(err.to_string().contains("\"holmes\""));
        assert_eq!(
            AnalysisError::missing("Study in Scarlet").to_string(),
            "missing key: Study in Scarlet"
        );
        assert_eq!(
            AnalysisError::invalid("n must be >= 1").to_string(),
            "invalid argument: n must be >= 1"
        );
    }
}

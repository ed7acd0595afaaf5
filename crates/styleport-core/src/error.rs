//! Error types for the conversion pipeline.

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fatal CSS parse error (unterminated block, string, or comment).
    #[error("CSS parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// Selector parsing error.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Invalid mapping configuration.
    #[error("Invalid mapping configuration: {0}")]
    Config(String),

    /// Internal generation invariant violated (a logic defect, not bad input).
    #[error("Generation invariant violated: {0}")]
    Generation(String),
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create a generation invariant error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }
}

//! Errors reported while building token specifications or scanning text.

use thiserror::Error;

/// Everything that can go wrong in the lexer.
///
/// [`LexError::Unrecognized`] is a problem with the input text; every other
/// variant means the token specifications themselves are unusable.
#[derive(Debug, Error)]
pub enum LexError {
    /// Input that no token pattern accepts, either between two matches or
    /// after the last one.
    #[error("Unrecognized input at {line}:{column}: {snippet:?}")]
    Unrecognized {
        line: usize,
        column: usize,
        snippet: String,
    },

    /// A token pattern matched the empty string while scanning.
    #[error("Zero-length match for token '{name}' at {line}:{column}")]
    ZeroLengthMatch {
        name: String,
        line: usize,
        column: usize,
    },

    /// A token pattern accepts the empty string and would never advance.
    #[error("Zero-length match for token '{name}'")]
    EmptyPattern { name: String },

    /// A token pattern is not a valid regular expression.
    #[error("invalid pattern for token '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// The individual patterns compile but their union does not.
    #[error("token patterns cannot be combined: {0}")]
    Composite(#[source] regex::Error),

    /// Two specifications share a name.
    #[error("duplicate token name '{0}'")]
    DuplicateName(String),

    /// No token specifications were given.
    #[error("no token specifications given")]
    NoSpecs,
}

//! Failure severities reported by grammar nodes.
//!
//! A [`ParseError::Recoverable`] failure means "this branch did not match"
//! and is retried by choices. A [`ParseError::Fatal`] failure means the input
//! committed to a branch and then broke it; nothing retries it and no hook
//! can suppress it. [`ParseError::Config`] reports a malformed grammar rather
//! than malformed input.

use parsekit_common::render_pointer;
use parsekit_lexer::Token;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Hook invoked with a recoverable failure before it is suppressed.
///
/// Hooks observe only: a node with a hook turns its recoverable failures
/// into an empty result that consumes nothing.
pub type FailHook<K> = Arc<dyn Fn(&ParseError<K>) + Send + Sync>;

/// The token a failure happened at and a message pointing at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure<K> {
    token: Option<Token<K>>,
    message: String,
}

impl<K> Failure<K> {
    /// Creates a failure with an already rendered message.
    pub fn new<S: Into<String>>(token: Option<Token<K>>, message: S) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }

    /// Creates a failure at `token`, rendering `message` under the token's
    /// source line in `text`.
    pub fn at(text: &str, token: Option<&Token<K>>, message: &str) -> Self
    where
        K: Clone,
    {
        Self {
            message: render_pointer(text, token.map(Token::position), message),
            token: token.cloned(),
        }
    }

    /// Returns the token the failure happened at, if the input was not
    /// exhausted.
    pub fn token(&self) -> Option<&Token<K>> {
        self.token.as_ref()
    }

    /// Returns the message, including the source pointer when positioned.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<K> fmt::Display for Failure<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{} - {}", token, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// A grammar that cannot be evaluated as built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A match node was built without a token kind to match.
    #[error("Token type is not set")]
    MissingTokenKind,

    /// A repeat's lower bound exceeds its upper bound.
    #[error("min_times > max_times ({min} > {max})")]
    InvalidRepeatBounds { min: usize, max: usize },
}

/// The error half of every parse outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError<K> {
    /// This alternative did not match; callers may try another.
    #[error("{0}")]
    Recoverable(Failure<K>),

    /// The input matched far enough that no alternative may be tried.
    #[error("{0}")]
    Fatal(Failure<K>),

    /// The grammar itself is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl<K> ParseError<K> {
    /// Returns true for [`ParseError::Fatal`].
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Fatal(_))
    }

    /// Returns true for [`ParseError::Recoverable`].
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParseError::Recoverable(_))
    }

    /// Returns the failure details of a recoverable or fatal error.
    pub fn failure(&self) -> Option<&Failure<K>> {
        match self {
            ParseError::Recoverable(failure) | ParseError::Fatal(failure) => Some(failure),
            ParseError::Config(_) => None,
        }
    }

    /// Returns the token the error happened at, if any.
    pub fn token(&self) -> Option<&Token<K>> {
        self.failure().and_then(Failure::token)
    }
}

use parsekit_common::Position;
use std::fmt;

/// The kind tag carried by every [`Token`].
///
/// Grammars match tokens by comparing kinds for equality, so any small
/// `Copy` enum works. Implemented automatically for every qualifying type.
pub trait TokenKind: Copy + Eq + fmt::Debug + Send + Sync + 'static {}

impl<T> TokenKind for T where T: Copy + Eq + fmt::Debug + Send + Sync + 'static {}

/// A positioned, typed fragment of source text.
///
/// Tokens are immutable once built. They display as their plain string
/// value; the position is metadata used for error reporting.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token<K> {
    kind: K,
    value: String,
    position: Position,
}

impl<K> Token<K> {
    /// Creates a token starting at `position`.
    pub fn new<S: Into<String>>(kind: K, value: S, position: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    /// Creates a token at the given line and column, with a zero byte offset.
    ///
    /// Handy for building token streams by hand in grammar tests.
    pub fn at<S: Into<String>>(kind: K, value: S, line: usize, column: usize) -> Self {
        Self::new(kind, value, Position::at(line, column, 0))
    }

    /// Returns the matched text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns where the token starts in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the 1-based line the token starts on.
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// Returns the 1-based column the token starts at.
    pub fn column(&self) -> usize {
        self.position.column
    }
}

impl<K: Copy> Token<K> {
    /// Returns the kind tag.
    pub fn kind(&self) -> K {
        self.kind
    }
}

impl<K> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<K: fmt::Debug> fmt::Debug for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Token {:?} {:?} @ {}>",
            self.kind, self.value, self.position
        )
    }
}

impl<K> AsRef<str> for Token<K> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<K> PartialEq<str> for Token<K> {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<K> PartialEq<&str> for Token<K> {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl<K> PartialEq<Token<K>> for &str {
    fn eq(&self, other: &Token<K>) -> bool {
        *self == other.value
    }
}

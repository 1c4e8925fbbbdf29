//! Grammar nodes and the builder API used to compose them.
//!
//! A [`Node`] is an immutable value. Builder calls consume the node and return
//! a new one, and composite nodes share their children through [`Arc`], so a
//! finished grammar is cheap to clone and can be parsed from many threads at
//! once.

use crate::combinator;
use crate::error::{ConfigError, FailHook, ParseError};
use crate::result::ParseOutcome;
use parsekit_lexer::{Token, TokenKind};
use std::fmt;
use std::ops::{Add, BitOr};
use std::sync::Arc;

/// The value test a match node applies after the kind test passes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Constraint {
    /// Any value matches; the token is always gathered.
    #[default]
    Any,
    /// The value must equal this string.
    Expected(String),
    /// The value must differ from this string.
    Unexpected(String),
}

impl Constraint {
    /// Returns the failure message if `value` does not satisfy the
    /// constraint.
    pub(crate) fn reject(&self, value: &str) -> Option<String> {
        match self {
            Constraint::Expected(expected) if value != expected => {
                Some(format!("Expected {expected}"))
            }
            Constraint::Unexpected(unexpected) if value == unexpected => {
                Some(format!("Expected anything but {unexpected}"))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind<K> {
    Match {
        filter: Option<K>,
        constraint: Constraint,
    },
    Sequence(Arc<Node<K>>, Arc<Node<K>>),
    Choice(Arc<Node<K>>, Arc<Node<K>>),
    Repeat {
        child: Arc<Node<K>>,
        min: usize,
        max: Option<usize>,
    },
    Pack(Arc<Node<K>>),
    Fatal(Arc<Node<K>>),
}

impl<K> NodeKind<K> {
    fn label(&self) -> &'static str {
        match self {
            NodeKind::Match { .. } => "match",
            NodeKind::Sequence(..) => "sequence",
            NodeKind::Choice(..) => "choice",
            NodeKind::Repeat { .. } => "repeat",
            NodeKind::Pack(_) => "pack",
            NodeKind::Fatal(_) => "fatal",
        }
    }
}

/// A grammar node.
///
/// Leaves are built with [`Node::token`]; composites with [`Node::then`],
/// [`Node::or`], [`Node::repeat`], [`Node::pack`] and [`Node::fatal`]. The
/// `+` and `|` operators are shorthand for `then` and `or`.
///
/// ```ignore
/// let number = Node::token(Kind::Number).gather(true);
/// let plus = Node::token(Kind::Plus).expected("+");
/// let sum = number.clone() + plus + number;
/// let (result, rest) = sum.parse(text, &tokens)?;
/// ```
#[derive(Clone)]
pub struct Node<K> {
    kind: NodeKind<K>,
    gather: bool,
    on_fail: Option<FailHook<K>>,
}

impl<K> Default for Node<K> {
    /// A match node without a kind filter. Parsing it reports
    /// [`ConfigError::MissingTokenKind`].
    fn default() -> Self {
        Self::from_kind(NodeKind::Match {
            filter: None,
            constraint: Constraint::Any,
        })
    }
}

impl<K> Node<K> {
    fn from_kind(kind: NodeKind<K>) -> Self {
        Self {
            kind,
            gather: false,
            on_fail: None,
        }
    }

    /// Returns whether value-constrained matches include their token.
    pub fn is_gathering(&self) -> bool {
        self.gather
    }
}

impl<K: TokenKind> Node<K> {
    /// Creates a match node for tokens of `kind`.
    ///
    /// Without a value constraint it matches, consumes and gathers any token
    /// of that kind.
    pub fn token(kind: K) -> Self {
        Self::from_kind(NodeKind::Match {
            filter: Some(kind),
            constraint: Constraint::Any,
        })
    }

    /// Requires the token's value to equal `value`. No effect on composite
    /// nodes.
    pub fn expected<S: Into<String>>(self, value: S) -> Self {
        self.constrain(Constraint::Expected(value.into()))
    }

    /// Requires the token's value to differ from `value`. No effect on
    /// composite nodes.
    pub fn unexpected<S: Into<String>>(self, value: S) -> Self {
        self.constrain(Constraint::Unexpected(value.into()))
    }

    fn constrain(mut self, value: Constraint) -> Self {
        if let NodeKind::Match { constraint, .. } = &mut self.kind {
            *constraint = value;
        }
        self
    }

    /// Sets whether a value-constrained match includes its token in the
    /// result. On a choice the flag is forwarded to both alternatives.
    pub fn gather(mut self, flag: bool) -> Self {
        match self.kind {
            NodeKind::Choice(first, second) => {
                self.kind = NodeKind::Choice(
                    Arc::new(Node::clone(&first).gather(flag)),
                    Arc::new(Node::clone(&second).gather(flag)),
                );
            }
            kind => {
                self.kind = kind;
                self.gather = flag;
            }
        }
        self
    }

    /// Installs a hook that observes this node's recoverable failures.
    ///
    /// With a hook installed, a recoverable failure is reported to it and the
    /// node then succeeds with an empty result, consuming nothing. A choice
    /// also reports every alternative that fails before its final error.
    /// Fatal and configuration errors bypass the hook.
    pub fn on_fail<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ParseError<K>) + Send + Sync + 'static,
    {
        self.on_fail = Some(Arc::new(hook));
        self
    }

    /// Matches `self`, then `next` on the remaining tokens.
    pub fn then(self, next: Node<K>) -> Self {
        Self::from_kind(NodeKind::Sequence(Arc::new(self), Arc::new(next)))
    }

    /// Tries `self`, and `other` if `self` fails recoverably.
    pub fn or(self, other: Node<K>) -> Self {
        Self::from_kind(NodeKind::Choice(Arc::new(self), Arc::new(other)))
    }

    /// Matches `self` greedily between `min` and `max` times. `None` means no
    /// upper bound.
    ///
    /// Running out of tokens ends the loop normally, even below `min`; only a
    /// failing child is held to the lower bound. The loop ends on failure,
    /// exhaustion or `max`, so an unbounded repeat over a child that can
    /// succeed without consuming never ends.
    pub fn repeat(self, min: usize, max: Option<usize>) -> Self {
        Self::from_kind(NodeKind::Repeat {
            child: Arc::new(self),
            min,
            max,
        })
    }

    /// Wraps a non-empty result in a single group.
    pub fn pack(self) -> Self {
        Self::from_kind(NodeKind::Pack(Arc::new(self)))
    }

    /// Turns recoverable failures of `self` into fatal ones.
    pub fn fatal(self) -> Self {
        Self::from_kind(NodeKind::Fatal(Arc::new(self)))
    }

    /// Checks the whole tree for configuration errors without parsing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.kind {
            NodeKind::Match { filter: None, .. } => Err(ConfigError::MissingTokenKind),
            NodeKind::Match { .. } => Ok(()),
            NodeKind::Sequence(lhs, rhs) | NodeKind::Choice(lhs, rhs) => {
                lhs.validate()?;
                rhs.validate()
            }
            NodeKind::Repeat { child, min, max } => {
                if let Some(max) = *max {
                    if *min > max {
                        return Err(ConfigError::InvalidRepeatBounds { min: *min, max });
                    }
                }
                child.validate()
            }
            NodeKind::Pack(child) | NodeKind::Fatal(child) => child.validate(),
        }
    }

    /// Parses a prefix of `tokens`.
    ///
    /// `text` is the source the tokens came from; it is only used to render
    /// the source line in error messages. On success the remainder is a
    /// suffix of `tokens`.
    pub fn parse<'t>(&self, text: &str, tokens: &'t [Token<K>]) -> ParseOutcome<'t, K> {
        self.parse_with(text, tokens, true)
    }

    /// Parses, letting the hook suppress recoverable failures only when
    /// `suppress` is set. A fatal wrapper parses its child with it cleared.
    pub(crate) fn parse_with<'t>(
        &self,
        text: &str,
        tokens: &'t [Token<K>],
        suppress: bool,
    ) -> ParseOutcome<'t, K> {
        log::trace!("{} node at {} tokens", self.kind.label(), tokens.len());

        let outcome = match &self.kind {
            NodeKind::Match { filter, constraint } => {
                combinator::match_token(text, tokens, *filter, constraint, self.gather)
            }
            NodeKind::Sequence(lhs, rhs) => combinator::sequence(text, tokens, lhs, rhs),
            NodeKind::Choice(first, second) => {
                combinator::choice(text, tokens, first, second, self.on_fail.as_ref())
            }
            NodeKind::Repeat { child, min, max } => {
                combinator::repeat(text, tokens, child, *min, *max)
            }
            NodeKind::Pack(child) => combinator::pack(text, tokens, child),
            NodeKind::Fatal(child) => combinator::fatal_wrap(text, tokens, child),
        };

        match (outcome, &self.on_fail) {
            (Err(error @ ParseError::Recoverable(_)), Some(hook)) => {
                hook(&error);
                if suppress {
                    log::debug!("{} node failure suppressed: {}", self.kind.label(), error);
                    Ok((Vec::new(), tokens))
                } else {
                    Err(error)
                }
            }
            (outcome, _) => outcome,
        }
    }
}

impl<K: TokenKind> Add for Node<K> {
    type Output = Node<K>;

    fn add(self, rhs: Node<K>) -> Node<K> {
        self.then(rhs)
    }
}

impl<K: TokenKind> BitOr for Node<K> {
    type Output = Node<K>;

    fn bitor(self, rhs: Node<K>) -> Node<K> {
        self.or(rhs)
    }
}

impl<K: fmt::Debug> fmt::Debug for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("gather", &self.gather)
            .field("on_fail", &self.on_fail.is_some())
            .finish()
    }
}

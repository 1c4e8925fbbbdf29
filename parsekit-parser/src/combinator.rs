//! Evaluation of each node kind.
//!
//! Every function here returns the raw outcome of one node; the node's own
//! `on_fail` hook is applied by [`Node::parse`] around it. A choice also
//! reports each failed alternative to its hook before trying the next.

use crate::error::{ConfigError, FailHook, Failure, ParseError};
use crate::node::{Constraint, Node};
use crate::result::{Element, ParseOutcome};
use parsekit_lexer::{Token, TokenKind};

/// Wraps `node` so its recoverable failures become fatal.
///
/// Equivalent to [`Node::fatal`].
pub fn fatal<K: TokenKind>(node: Node<K>) -> Node<K> {
    node.fatal()
}

fn recoverable<K: TokenKind>(text: &str, token: Option<&Token<K>>, message: &str) -> ParseError<K> {
    ParseError::Recoverable(Failure::at(text, token, message))
}

pub(crate) fn match_token<'t, K: TokenKind>(
    text: &str,
    tokens: &'t [Token<K>],
    filter: Option<K>,
    constraint: &Constraint,
    gather: bool,
) -> ParseOutcome<'t, K> {
    let Some((head, tail)) = tokens.split_first() else {
        return Err(ParseError::Recoverable(Failure::new(None, "tokens is empty")));
    };
    let kind = filter.ok_or(ConfigError::MissingTokenKind)?;

    if head.kind() != kind {
        return Err(recoverable(text, Some(head), &format!("Expected {kind:?}")));
    }

    if let Constraint::Any = constraint {
        return Ok((vec![Element::Token(head.clone())], tail));
    }

    if let Some(message) = constraint.reject(head.value()) {
        return Err(recoverable(text, Some(head), &message));
    }

    let result = if gather {
        vec![Element::Token(head.clone())]
    } else {
        Vec::new()
    };
    Ok((result, tail))
}

pub(crate) fn sequence<'t, K: TokenKind>(
    text: &str,
    tokens: &'t [Token<K>],
    lhs: &Node<K>,
    rhs: &Node<K>,
) -> ParseOutcome<'t, K> {
    let (mut result, rest) = lhs.parse(text, tokens)?;
    let (tail, rest) = rhs.parse(text, rest)?;
    result.extend(tail);
    Ok((result, rest))
}

pub(crate) fn choice<'t, K: TokenKind>(
    text: &str,
    tokens: &'t [Token<K>],
    first: &Node<K>,
    second: &Node<K>,
    hook: Option<&FailHook<K>>,
) -> ParseOutcome<'t, K> {
    for branch in [first, second] {
        match branch.parse(text, tokens) {
            Err(error @ ParseError::Recoverable(_)) => {
                log::debug!("alternative failed: {error}");
                if let Some(hook) = hook {
                    hook(&error);
                }
            }
            outcome => return outcome,
        }
    }

    Err(recoverable(text, tokens.first(), "no alternative matched"))
}

pub(crate) fn repeat<'t, K: TokenKind>(
    text: &str,
    tokens: &'t [Token<K>],
    child: &Node<K>,
    min: usize,
    max: Option<usize>,
) -> ParseOutcome<'t, K> {
    if let Some(max) = max {
        if min > max {
            return Err(ConfigError::InvalidRepeatBounds { min, max }.into());
        }
    }

    let mut result = Vec::new();
    let mut rest = tokens;
    let mut count = 0;

    while let Some(head) = rest.first() {
        if max.is_some_and(|max| count >= max) {
            break;
        }
        match child.parse(text, rest) {
            Ok((items, next)) => {
                result.extend(items);
                rest = next;
                count += 1;
            }
            Err(ParseError::Recoverable(_)) if count >= min => break,
            Err(ParseError::Recoverable(_)) => {
                let position = head.position();
                let message = format!("Expected at least {min} matches at {position}");
                return Err(recoverable(text, Some(head), &message));
            }
            Err(error) => return Err(error),
        }
    }

    log::trace!("repeat matched {count} times");
    Ok((result, rest))
}

pub(crate) fn pack<'t, K: TokenKind>(
    text: &str,
    tokens: &'t [Token<K>],
    child: &Node<K>,
) -> ParseOutcome<'t, K> {
    let (inner, rest) = child.parse(text, tokens)?;
    if inner.is_empty() {
        return Ok((inner, rest));
    }
    Ok((vec![Element::Group(inner)], rest))
}

pub(crate) fn fatal_wrap<'t, K: TokenKind>(
    text: &str,
    tokens: &'t [Token<K>],
    child: &Node<K>,
) -> ParseOutcome<'t, K> {
    child
        .parse_with(text, tokens, false)
        .map_err(|error| match error {
            ParseError::Recoverable(failure) => ParseError::Fatal(failure),
            other => other,
        })
}

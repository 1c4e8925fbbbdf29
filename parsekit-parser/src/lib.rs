//! A parser-combinator engine over token slices.
//!
//! Grammars are trees of [`Node`] values. Parsing a node consumes a prefix of
//! a token slice and returns the gathered result together with the remaining
//! suffix, or a [`ParseError`] that is either recoverable (try another
//! alternative), fatal (stop), or a configuration problem in the grammar.

pub mod combinator;
pub mod error;
pub mod node;
pub mod result;

pub use combinator::fatal;
pub use error::{ConfigError, FailHook, Failure, ParseError};
pub use node::{Constraint, Node};
pub use parsekit_lexer::{Token, TokenKind};
pub use result::{flatten, Element, ParseOutcome, ParseResult, ParseReturn};

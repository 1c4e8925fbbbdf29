mod cursor;
pub mod error;
pub mod spec;
pub mod token;
pub mod tokenizer;

pub use error::LexError;
pub use parsekit_common::Position;
pub use spec::{Constructor, SpecSet, TokenSpec};
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};

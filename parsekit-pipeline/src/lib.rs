//! Tokenize-then-parse in one call.
//!
//! A [`Pipeline`] owns a token specification set and a validated grammar.
//! Each run tokenizes the text, drops skipped fragments, and parses the
//! resulting token list with the grammar.

use parsekit_lexer::{tokenize, LexError, SpecSet, Token, TokenKind};
use parsekit_parser::{ConfigError, Failure, Node, ParseError, ParseResult};
use thiserror::Error;

pub use parsekit_common::Position;

/// A failure in either stage of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError<K> {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError<K>),
}

impl<K> From<ConfigError> for PipelineError<K> {
    fn from(error: ConfigError) -> Self {
        PipelineError::Parse(ParseError::Config(error))
    }
}

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<K> {
    /// What the grammar gathered.
    pub result: ParseResult<K>,
    /// Tokens the grammar did not consume, in order.
    pub remaining: Vec<Token<K>>,
}

impl<K> Parsed<K> {
    /// Returns true when the grammar consumed every token.
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// A token specification set paired with the grammar that parses its output.
#[derive(Debug, Clone)]
pub struct Pipeline<K> {
    specs: SpecSet<K>,
    grammar: Node<K>,
}

impl<K: TokenKind> Pipeline<K> {
    /// Creates a pipeline, rejecting grammars with configuration errors.
    pub fn new(specs: SpecSet<K>, grammar: Node<K>) -> Result<Self, PipelineError<K>> {
        grammar.validate()?;
        Ok(Self { specs, grammar })
    }

    pub fn specs(&self) -> &SpecSet<K> {
        &self.specs
    }

    pub fn grammar(&self) -> &Node<K> {
        &self.grammar
    }

    /// Tokenizes `text`, dropping skipped fragments.
    pub fn tokens(&self, text: &str) -> Result<Vec<Token<K>>, LexError> {
        tokenize(text, &self.specs).into_tokens()
    }

    /// Parses as much of `text` as the grammar accepts.
    pub fn run(&self, text: &str) -> Result<Parsed<K>, PipelineError<K>> {
        let tokens = self.tokens(text)?;
        log::debug!("pipeline parsing {} tokens", tokens.len());

        let (result, rest) = self.grammar.parse(text, &tokens)?;
        Ok(Parsed {
            result,
            remaining: rest.to_vec(),
        })
    }

    /// Parses `text` and requires the grammar to consume every token.
    pub fn run_complete(&self, text: &str) -> Result<ParseResult<K>, PipelineError<K>> {
        let parsed = self.run(text)?;
        if let Some(first) = parsed.remaining.first() {
            log::debug!("{} tokens left unparsed", parsed.remaining.len());
            let failure = Failure::at(text, Some(first), "Unexpected trailing input");
            return Err(ParseError::Recoverable(failure).into());
        }
        Ok(parsed.result)
    }
}

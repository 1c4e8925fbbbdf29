use crate::cursor::Cursor;
use crate::error::LexError;
use crate::spec::SpecSet;
use crate::token::Token;
use std::iter::FusedIterator;

/// Maximum number of characters quoted when trailing input is unrecognized.
const TRAILING_SNIPPET_CHARS: usize = 20;

/// Starts tokenizing `text` against `specs`.
///
/// Nothing is scanned until the returned iterator is polled.
pub fn tokenize<'s, 'h, K>(text: &'h str, specs: &'s SpecSet<K>) -> Tokenizer<'s, 'h, K> {
    Tokenizer::new(text, specs)
}

/// A lazy tokenizer over one input text.
///
/// Each call to `next` runs a single search of the combined pattern from
/// the current offset and yields whatever the matching specification's
/// constructor returns, including `None` skip values. The first error ends
/// the iteration.
#[derive(Debug)]
pub struct Tokenizer<'s, 'h, K> {
    specs: &'s SpecSet<K>,
    cursor: Cursor<'h>,
    finished: bool,
}

impl<'s, 'h, K> Tokenizer<'s, 'h, K> {
    /// Creates a tokenizer positioned at the start of `text`.
    pub fn new(text: &'h str, specs: &'s SpecSet<K>) -> Self {
        Self {
            specs,
            cursor: Cursor::new(text),
            finished: false,
        }
    }

    /// Drains the tokenizer into an indexable token list, dropping skip
    /// values.
    pub fn into_tokens(self) -> Result<Vec<Token<K>>, LexError> {
        self.filter_map(Result::transpose).collect()
    }

    fn fail(&mut self, error: LexError) -> Option<Result<Option<Token<K>>, LexError>> {
        self.finished = true;
        Some(Err(error))
    }
}

impl<K> Iterator for Tokenizer<'_, '_, K> {
    type Item = Result<Option<Token<K>>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let specs = self.specs;
        let text = self.cursor.input();
        let offset = self.cursor.offset();
        let position = self.cursor.position();

        let Some(caps) = specs.regex().captures_at(text, offset) else {
            if self.cursor.is_eof() {
                self.finished = true;
                return None;
            }
            return self.fail(LexError::Unrecognized {
                line: position.line,
                column: position.column,
                snippet: self.cursor.snippet(TRAILING_SNIPPET_CHARS).to_string(),
            });
        };
        let Some(whole) = caps.get(0) else {
            self.finished = true;
            return None;
        };

        if whole.start() != offset {
            return self.fail(LexError::Unrecognized {
                line: position.line,
                column: position.column,
                snippet: text[offset..whole.start()].to_string(),
            });
        }

        let Some(spec) = specs.matched(&caps) else {
            // Only reachable if the combined pattern matched outside every
            // named group, which its construction rules out.
            self.finished = true;
            return None;
        };

        if whole.is_empty() {
            return self.fail(LexError::ZeroLengthMatch {
                name: spec.name().to_string(),
                line: position.line,
                column: position.column,
            });
        }

        let value = self.cursor.advance_to(whole.end());
        log::trace!("matched {} {:?} at {}", spec.name(), value, position);

        Some(Ok(spec.construct(value, position)))
    }
}

impl<K> FusedIterator for Tokenizer<'_, '_, K> {}

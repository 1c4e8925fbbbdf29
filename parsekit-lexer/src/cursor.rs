use parsekit_common::Position;

/// A cursor over the input text being tokenized.
///
/// The cursor owns the line/column bookkeeping: every character it steps
/// over moves the position, so a token's start position is simply the
/// cursor position before the token's text is consumed.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'h> {
    input: &'h str,
    current: usize,
    position: Position,
}

impl<'h> Cursor<'h> {
    /// Creates a new cursor at the start of `input`.
    pub fn new(input: &'h str) -> Self {
        Self {
            input,
            current: 0,
            position: Position::new(),
        }
    }

    /// Returns the whole input.
    pub fn input(&self) -> &'h str {
        self.input
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.current >= self.input.len()
    }

    /// Returns the remaining input from the current position.
    pub fn remaining(&self) -> &'h str {
        &self.input[self.current..]
    }

    /// Returns at most `n` characters of the remaining input.
    pub fn snippet(&self, n: usize) -> &'h str {
        let remaining = self.remaining();
        let end = remaining
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());
        &remaining[..end]
    }

    /// Consumes everything up to the byte offset `end` and returns it.
    ///
    /// `end` must lie on a character boundary at or after the current
    /// offset; offsets behind the cursor consume nothing.
    pub fn advance_to(&mut self, end: usize) -> &'h str {
        let start = self.current;
        let end = end.min(self.input.len());
        if end <= start {
            return "";
        }
        let consumed = &self.input[start..end];
        for ch in consumed.chars() {
            self.position.advance(ch);
        }
        self.current = end;
        consumed
    }
}

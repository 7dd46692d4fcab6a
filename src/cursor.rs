//! Position over the raw argument tokens.

/// An integer cursor over the argument vector.
///
/// `next_token` hands out the token at the cursor and moves past it; `retreat`
/// steps back one so the last token handed out is seen again.
#[derive(Debug, Clone)]
pub struct ArgumentCursor<'a> {
    tokens: &'a [String],
    position: usize,
}

impl<'a> ArgumentCursor<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Take the next token, or `None` when the tokens are exhausted.
    pub fn next_token(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token.as_str())
    }

    pub fn retreat(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Index of the token the next call to `next_token` returns.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> &'a [String] {
        &self.tokens[self.position..]
    }
}

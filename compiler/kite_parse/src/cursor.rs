//! Token cursor.

use kite_ir::{Span, Token, TokenKind, TokenList};

use crate::ParseError;

/// Position in a [`TokenList`].
///
/// The list always ends in `Eof`, and the cursor never advances past it, so
/// `current` is always valid.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    prev_end: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
            prev_end: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.peek_at(0)
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.current().span
    }

    /// Token `offset` positions ahead, clamped to `Eof`.
    pub fn peek_at(&self, offset: usize) -> Token {
        let eof = Token::new(TokenKind::Eof, Span::new(self.prev_end, self.prev_end));
        let last = self.tokens.last().copied().unwrap_or(eof);
        self.tokens.get(self.pos + offset).copied().unwrap_or(last)
    }

    #[inline]
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.peek_at(offset).kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.kind(), TokenKind::Eof)
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
            self.prev_end = token.span.end;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    pub fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.prev_end.max(start.start))
    }

    #[cold]
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::Unexpected {
            expected,
            found: self.kind().describe(),
            span: self.span(),
        }
    }
}

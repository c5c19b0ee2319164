//! Grammar productions, split by statements and expressions.

mod expr;
mod stmt;

use crate::{ParseError, Parser, MAX_NESTING};
use kite_ir::{Name, TokenKind};

impl Parser<'_> {
    /// Run `f` one nesting level deeper, guarding both the host stack and the
    /// nesting limit.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep {
                span: self.cursor.span(),
            });
        }
        self.depth += 1;
        let result = kite_stack::ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    fn expect_ident(&mut self) -> Result<Name, ParseError> {
        match self.cursor.kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Ok(name)
            }
            _ => Err(self.cursor.unexpected("identifier")),
        }
    }

    /// Skip to just past the next `;` or balanced `{ ... }`, or to the next
    /// unmatched `}` or statement keyword.
    fn synchronize(&mut self) {
        let start = self.cursor.position();
        let mut braces = 0u32;
        loop {
            match self.cursor.kind() {
                TokenKind::Eof => return,
                TokenKind::Semicolon if braces == 0 => {
                    self.cursor.advance();
                    return;
                }
                TokenKind::LBrace => {
                    braces += 1;
                    self.cursor.advance();
                }
                TokenKind::RBrace if braces > 0 => {
                    braces -= 1;
                    self.cursor.advance();
                    if braces == 0 {
                        return;
                    }
                }
                TokenKind::RBrace
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::For
                | TokenKind::Switch
                | TokenKind::Return
                | TokenKind::Try
                | TokenKind::Throw
                | TokenKind::Function
                | TokenKind::Class
                | TokenKind::Var
                    if braces == 0 && self.cursor.position() > start =>
                {
                    return;
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }
}

//! Parse errors.

use kite_ir::{SourceMap, Span, StringInterner};
use kite_lexer::LexError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },

    #[error("invalid {what} target")]
    InvalidTarget { what: &'static str, span: Span },

    #[error("`...` must be the last parameter")]
    MisplacedEllipsis { span: Span },

    #[error("switch has more than one `default`")]
    DuplicateDefault { span: Span },

    #[error("nesting is too deep")]
    TooDeep { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::Unexpected { span, .. }
            | ParseError::InvalidTarget { span, .. }
            | ParseError::MisplacedEllipsis { span }
            | ParseError::DuplicateDefault { span }
            | ParseError::TooDeep { span } => *span,
        }
    }

    /// `file:line: message`, the same shape as runtime diagnostics.
    pub fn render(&self, source: &SourceMap, interner: &StringInterner) -> String {
        format!(
            "{}:{}: {}",
            interner.lookup(source.file()),
            source.line(self.span()),
            self
        )
    }
}

//! Recursive-descent parser for Kite.
//!
//! [`parse`] turns a [`TokenList`] into an [`ExprArena`] plus the top-level
//! [`Module`]. Errors do not stop parsing: the statement parser records the
//! error, skips to the next statement boundary and carries on, so a single run
//! reports every independent mistake.

mod cursor;
mod error;
mod grammar;

use cursor::Cursor;
pub use error::ParseError;
use kite_ir::{ExprArena, Module, SourceMap, StringInterner, TokenList};

/// Deepest statement or expression nesting the parser accepts.
pub const MAX_NESTING: u32 = 4096;

/// Result of parsing one source file.
#[derive(Debug)]
pub struct ParseOutput {
    pub module: Module,
    pub arena: ExprArena,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Every error rendered as `file:line: message`.
    pub fn diagnostics(&self, interner: &StringInterner) -> Vec<String> {
        self.errors
            .iter()
            .map(|err| err.render(self.arena.source(), interner))
            .collect()
    }
}

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    #[allow(dead_code)]
    interner: &'a StringInterner,
    errors: Vec<ParseError>,
    depth: u32,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a TokenList, source: SourceMap, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::new(source),
            interner,
            errors: Vec::new(),
            depth: 0,
        }
    }
}

/// Parse an already-lexed token list.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList, source: SourceMap, interner: &StringInterner) -> ParseOutput {
    let mut parser = Parser::new(tokens, source, interner);
    let body = parser.parse_program();
    ParseOutput {
        module: Module { body },
        arena: parser.arena,
        errors: parser.errors,
    }
}

/// Lex and parse `source`, attributing positions to `file`.
pub fn parse_source(source: &str, file: &str, interner: &StringInterner) -> ParseOutput {
    let lexed = kite_lexer::lex(source, interner);
    let map = SourceMap::new(interner.intern(file), source);
    let mut output = parse(&lexed.tokens, map, interner);
    if !lexed.errors.is_empty() {
        // Lex errors come first; the parser's errors at the same tokens are
        // usually consequences.
        let mut errors: Vec<ParseError> = lexed.errors.into_iter().map(ParseError::from).collect();
        errors.extend(
            output
                .errors
                .into_iter()
                .filter(|err| !matches!(err, ParseError::Unexpected { found, .. } if *found == "invalid token")),
        );
        output.errors = errors;
    }
    output
}

#[cfg(test)]
mod tests;

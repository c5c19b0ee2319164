//! The `tokens` command: print the lexer's view of a file.

use super::USAGE_STATUS;
use kite_ir::{SourceMap, StringInterner, TokenKind};
use std::io::Write;

/// Write one `line: kind text` row per token, then any lex errors.
pub fn dump_tokens(file: &str, source: &str, out: &mut dyn Write) -> i32 {
    let interner = StringInterner::new();
    let lexed = kite_lexer::lex(source, &interner);
    let map = SourceMap::new(interner.intern(file), source);

    let mut write = || -> std::io::Result<()> {
        for token in lexed.tokens.iter() {
            let line = map.line(token.span);
            match token.kind {
                TokenKind::Ident(name) | TokenKind::Str(name) => {
                    writeln!(out, "{line:>4}: {} {:?}", token.kind, interner.lookup(name))?;
                }
                TokenKind::Int(value) => writeln!(out, "{line:>4}: {} {value}", token.kind)?,
                TokenKind::Float(value) => writeln!(out, "{line:>4}: {} {value}", token.kind)?,
                TokenKind::Type(tag) => writeln!(out, "{line:>4}: {} {tag}", token.kind)?,
                kind => writeln!(out, "{line:>4}: {kind}")?,
            }
        }
        for err in &lexed.errors {
            writeln!(out, "{file}:{}: {err}", map.line(err.span()))?;
        }
        Ok(())
    };
    if let Err(err) = write() {
        tracing::warn!(%err, "failed to write token dump");
    }

    if lexed.errors.is_empty() {
        0
    } else {
        USAGE_STATUS
    }
}

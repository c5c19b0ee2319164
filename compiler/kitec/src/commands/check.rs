//! The `check` command: parse without running.

use super::USAGE_STATUS;
use kite_ir::StringInterner;
use std::io::Write;

/// Parse `source` and report every error. Returns 0 when it parses cleanly.
pub fn check_source(file: &str, source: &str, out: &mut dyn Write) -> i32 {
    let interner = StringInterner::new();
    let program = kite_parse::parse_source(source, file, &interner);
    let diagnostics = program.diagnostics(&interner);
    let written = if diagnostics.is_empty() {
        writeln!(out, "{file}: ok ({} statements)", program.module.body.len())
    } else {
        diagnostics
            .iter()
            .try_for_each(|line| writeln!(out, "{line}"))
    };
    if let Err(err) = written {
        tracing::warn!(%err, "failed to write check report");
    }
    if diagnostics.is_empty() {
        0
    } else {
        USAGE_STATUS
    }
}

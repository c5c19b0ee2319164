//! Command handlers for the `kite` CLI.
//!
//! Handlers take already-read source text and the streams to write to, and
//! return the exit status. [`read_source`] is the shared file loader.

mod check;
mod run;
mod tokens;

pub use check::check_source;
pub use run::run_script;
pub use tokens::dump_tokens;

use std::path::Path;

/// Exit status for parse errors and unreadable files.
pub const USAGE_STATUS: i32 = 2;

/// Read a script file, reporting failures on stderr.
pub fn read_source(path: &Path) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|err| {
        eprintln!("error: cannot read '{}': {err}", path.display());
        USAGE_STATUS
    })
}

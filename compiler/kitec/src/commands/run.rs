//! The `run` command.

use super::USAGE_STATUS;
use crate::RunOptions;
use kite_eval::{Interpreter, Output};

/// Parse and execute `source`, returning the script's exit status.
///
/// Parse errors are written to `error_output` as `file:line: message` lines
/// and yield [`USAGE_STATUS`] without running anything.
pub fn run_script(
    file: &str,
    source: &str,
    options: &RunOptions,
    output: Output,
    error_output: Output,
) -> i32 {
    let mut builder = Interpreter::builder()
        .file_name(file)
        .safe_mode(options.safe)
        .input(kite_eval::Input::Stdin);
    if let Some(depth) = options.max_depth {
        builder = builder.max_call_depth(depth);
    }
    let mut interpreter = builder.output(output).error_output(error_output.clone()).build();

    let program = interpreter.parse(file, source);
    if program.has_errors() {
        for line in program.diagnostics(interpreter.interner()) {
            error_output.write(format!("{line}\n").as_bytes());
        }
        error_output.flush();
        return USAGE_STATUS;
    }

    let outcome = interpreter.run(program);
    tracing::debug!(status = outcome.status, "script finished");
    outcome.status
}

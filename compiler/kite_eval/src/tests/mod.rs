//! Script-level tests. Each case runs Kite source through an interpreter
//! whose streams are captured in memory.

#![allow(clippy::panic, reason = "a parse failure aborts the test")]

mod call_tests;
mod class_tests;
mod host_tests;

use crate::{Interpreter, InterpreterBuilder, Outcome, Output};

pub(crate) const FILE: &str = "test.kite";

/// Captured result of one script run.
pub(crate) struct Run {
    pub(crate) stdout: String,
    pub(crate) stderr: String,
    pub(crate) outcome: Outcome,
}

pub(crate) fn run_with(builder: InterpreterBuilder, source: &str) -> Run {
    let (output, stdout) = Output::buffer();
    let (error_output, stderr) = Output::buffer();
    let mut interpreter = builder
        .output(output)
        .error_output(error_output)
        .file_name(FILE)
        .build();
    let outcome = match interpreter.run_str(source) {
        Ok(outcome) => outcome,
        Err(errors) => panic!("parse errors: {errors:?}"),
    };
    Run {
        stdout: stdout.text(),
        stderr: stderr.text(),
        outcome,
    }
}

pub(crate) fn run(source: &str) -> Run {
    run_with(Interpreter::builder(), source)
}

/// Stdout of a script that must complete normally.
pub(crate) fn output(source: &str) -> String {
    let run = run(source);
    assert!(
        run.outcome.is_success(),
        "script failed with {:?}: {}",
        run.outcome,
        run.stderr
    );
    run.stdout
}

/// Diagnostic line of a script that must fail fatally.
pub(crate) fn fatal(source: &str) -> String {
    let run = run(source);
    assert_eq!(run.outcome.status, crate::FATAL_STATUS, "stdout: {}", run.stdout);
    assert!(run.outcome.error.is_some());
    run.stderr
}

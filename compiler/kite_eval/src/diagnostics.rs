//! Run outcomes.

use kite_value::EvalError;

/// Exit status recorded for a fatal error.
pub const FATAL_STATUS: i32 = 1;

/// How a script run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// `0` on normal completion, the `exit()` argument, or [`FATAL_STATUS`].
    pub status: i32,
    /// The fatal error, if that is what ended the run.
    pub error: Option<EvalError>,
}

impl Outcome {
    pub fn success() -> Self {
        Outcome {
            status: 0,
            error: None,
        }
    }

    pub fn exited(status: i32) -> Self {
        Outcome {
            status,
            error: None,
        }
    }

    pub fn fatal(error: EvalError) -> Self {
        Outcome {
            status: FATAL_STATUS,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 0 && self.error.is_none()
    }
}

//! Nesting limits.

/// Depth limits checked by the evaluator. Exceeding any of them is fatal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalLimits {
    /// Nested function, method and constructor calls.
    pub max_call_depth: usize,
    /// Nested loops and switches within one call frame.
    pub max_loop_depth: usize,
    /// Nested `try` sections, across all frames.
    pub max_try_depth: usize,
}

impl EvalLimits {
    pub const DEFAULT_CALL_DEPTH: usize = 1000;
    pub const DEFAULT_LOOP_DEPTH: usize = 10_000;
    pub const DEFAULT_TRY_DEPTH: usize = 1000;
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_call_depth: Self::DEFAULT_CALL_DEPTH,
            max_loop_depth: Self::DEFAULT_LOOP_DEPTH,
            max_try_depth: Self::DEFAULT_TRY_DEPTH,
        }
    }
}

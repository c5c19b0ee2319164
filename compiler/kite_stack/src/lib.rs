//! On-demand stack growth.
//!
//! Both the parser and the evaluator recurse once per nesting level of the
//! script. Script-level depth limits (call, loop, try) bound the recursion, but
//! a limit of a few thousand frames can still exceed a default 2 MiB thread
//! stack. Every recursive entry point runs through [`ensure_sufficient_stack`],
//! which switches to a freshly allocated segment when the current one is
//! nearly exhausted. On `wasm32` it simply calls the closure.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first moving to a new stack segment if the current one is low.
#[cfg(not(target_arch = "wasm32"))]
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; wasm manages its own stack.
#[cfg(target_arch = "wasm32")]
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    let _ = (RED_ZONE, SEGMENT_SIZE);
    f()
}

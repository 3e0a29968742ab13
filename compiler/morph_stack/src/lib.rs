//! Stack growth for deep structural recursion.
//!
//! Matching nested terms, rewriting templates that splice a recursive result
//! (`[last, ...reverse(rest)]`), and walking nested composites all recurse on
//! the native stack. The reducer bounds the *logical* depth itself; this crate
//! makes sure a generous logical bound never turns into a native overflow.
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: plain call, the runtime owns the stack.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
///
/// Rewriting a recursive template keeps a capture set and a partially built
/// term alive per frame, so frames are wider than a plain interpreter call.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// Wrap every call that re-enters matching or reduction on a sub-term:
///
/// ```text
/// fn reduce_nested(&mut self, term: Term) -> Result<Term, ReduceError> {
///     ensure_sufficient_stack(|| self.reduce_inner(term))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of stack left before the red zone, when the platform can tell.
///
/// Reported in the reducer's trace output each time it enters a rule frame.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// WASM: unknown.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests;

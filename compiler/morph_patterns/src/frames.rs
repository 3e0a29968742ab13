//! Live stack of nested rule applications.
//!
//! Every non-tail rule application pushes a frame; returning pops it. The
//! depth check is integrated into `push()`. Tail feedback (`Reduce` as an
//! arm's whole template) runs inside the current frame and never pushes.

use morph_ir::Name;

use crate::errors::{recursion_limit_exceeded, Limit, ReduceError};

#[derive(Clone, Debug)]
pub struct RuleStack {
    frames: Vec<Name>,
    max_depth: usize,
}

impl RuleStack {
    pub fn new(max_depth: usize) -> Self {
        RuleStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame for `rule`. The frame is not pushed on overflow.
    pub fn push(&mut self, rule: &Name) -> Result<(), ReduceError> {
        if self.frames.len() >= self.max_depth {
            tracing::debug!(rule = %rule, max = self.max_depth, "rule depth limit reached");
            return Err(recursion_limit_exceeded(Limit::Depth, self.max_depth));
        }
        self.frames.push(rule.clone());
        Ok(())
    }

    /// Pop the most recent frame.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the stack is empty.
    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "RuleStack::pop() on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Innermost rule, if any.
    #[inline]
    pub fn current(&self) -> Option<&Name> {
        self.frames.last()
    }
}

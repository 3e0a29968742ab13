//! Reduction modes.
//!
//! Parameterizes the reducer via a `ReduceMode` enum so hosts that rewrite
//! types at check time, hosts that fold constants under a tight budget, and
//! test harnesses each get their own limits. Uses enum dispatch so a mode can
//! be stored in hashed host queries.
//!
//! # Prior Art
//!
//! - **TypeScript** instantiation depth (50) and instantiation count limits
//! - **Rust** `recursion_limit` crate attribute, `const_eval_limit`

use crate::errors::{recursion_limit_exceeded, Limit, ReduceError};

/// Reduction mode: determines depth and step limits via match dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReduceMode {
    /// Generous limits; deep non-tail recursion grows the native stack.
    #[default]
    Host,
    /// Tight, budgeted reduction for compile-time folding.
    ConstEval {
        /// Maximum number of reducer steps before aborting.
        budget: u32,
    },
    /// Bounded limits so runaway rules fail tests quickly.
    TestRun,
    /// Limits chosen by the host.
    Custom {
        max_depth: usize,
        budget: Option<u32>,
    },
}

impl ReduceMode {
    /// Maximum number of nested (non-tail) rule applications.
    ///
    /// - `Host`: 10 000 on native (stacker grows the stack), 200 on WASM
    /// - `ConstEval`: 512
    /// - `TestRun`: 2 000
    #[inline]
    pub fn max_recursion_depth(&self) -> usize {
        match self {
            Self::Host => {
                #[cfg(target_arch = "wasm32")]
                {
                    200
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    10_000
                }
            }
            Self::ConstEval { .. } => 512,
            Self::TestRun => 2_000,
            Self::Custom { max_depth, .. } => *max_depth,
        }
    }

    /// Total reducer steps allowed in one reduction, or `None` for unlimited.
    #[inline]
    pub fn step_budget(&self) -> Option<u32> {
        match self {
            Self::Host => Some(1_000_000),
            Self::ConstEval { budget } => Some(*budget),
            Self::TestRun => Some(100_000),
            Self::Custom { budget, .. } => *budget,
        }
    }
}

/// Optional counters for profiling a reduction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReduceCounters {
    /// Arm patterns tried.
    pub match_attempts: u64,
    /// Arm patterns that matched and whose guard held.
    pub arms_taken: u64,
    /// Feedback steps run by the reducer loop without nesting.
    pub tail_steps: u64,
    /// Nested rule applications.
    pub nested_calls: u64,
    pub memo_hits: u64,
    /// Deepest rule stack observed.
    pub max_depth: usize,
}

/// Per-reduction mutable state stored alongside `ReduceMode`.
pub struct ReduceState {
    pub steps: usize,
    budget: Option<u32>,
    /// When `None`, counter increments are no-ops.
    counters: Option<ReduceCounters>,
}

impl ReduceState {
    pub fn new(mode: &ReduceMode) -> Self {
        ReduceState {
            steps: 0,
            budget: mode.step_budget(),
            counters: None,
        }
    }

    pub fn enable_counters(&mut self) {
        self.counters = Some(ReduceCounters::default());
    }

    /// Check and increment the step budget.
    #[inline]
    pub fn check_budget(&mut self) -> Result<(), ReduceError> {
        self.steps = self.steps.saturating_add(1);
        if let Some(budget) = self.budget {
            if self.steps > budget as usize {
                return Err(recursion_limit_exceeded(Limit::Steps, budget as usize));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn count_match_attempt(&mut self) {
        if let Some(ref mut c) = self.counters {
            c.match_attempts += 1;
        }
    }

    #[inline]
    pub fn count_arm_taken(&mut self) {
        if let Some(ref mut c) = self.counters {
            c.arms_taken += 1;
        }
    }

    #[inline]
    pub fn count_tail_step(&mut self) {
        if let Some(ref mut c) = self.counters {
            c.tail_steps += 1;
        }
    }

    #[inline]
    pub fn count_nested_call(&mut self, depth: usize) {
        if let Some(ref mut c) = self.counters {
            c.nested_calls += 1;
            c.max_depth = c.max_depth.max(depth);
        }
    }

    #[inline]
    pub fn count_memo_hit(&mut self) {
        if let Some(ref mut c) = self.counters {
            c.memo_hits += 1;
        }
    }

    pub fn counters(&self) -> Option<&ReduceCounters> {
        self.counters.as_ref()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

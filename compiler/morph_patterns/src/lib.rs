//! Morph Patterns - matching, rewriting and reduction over morph terms.
//!
//! This crate provides:
//! - [`match_term`]: decompose a term against a pattern into a [`CaptureSet`]
//! - [`rewrite`]: build a term from captures and a template
//! - [`Reducer`]: run a rule, including self-referential ones, to a result
//! - [`is_assignable`] / [`mutually_assignable`]: the structural "fits"
//!   relation used by guards and `Fits` patterns
//!
//! # Termination
//!
//! Every reduction is bounded by the [`ReduceMode`]'s depth limit and step
//! budget. Rules declared `Recursion::Shrinking` are additionally checked to
//! feed back strictly smaller terms on every step, and input terms are checked
//! for reference cycles before the first step.

mod assign;
mod captures;
mod composite;
mod errors;
mod frames;
mod matcher;
mod memo;
mod mode;
mod reducer;
mod rewriter;
mod text;
mod validate;

pub use assign::{is_assignable, mutually_assignable};
pub use captures::CaptureSet;
pub use errors::{Limit, ReduceError, ReduceErrorKind, ReduceResult};
pub use frames::RuleStack;
pub use matcher::match_term;
pub use memo::MemoTable;
pub use mode::{ReduceCounters, ReduceMode, ReduceState};
pub use reducer::Reducer;
pub use rewriter::{rewrite, rewrite_in, Reentry};
pub use validate::validate_rule;

// Re-export error constructors for use by other crates
pub use errors::{
    arithmetic_undefined, arity_mismatch, cyclic_term, expected_kind, kind_mismatch,
    no_enclosing_rule, non_shrinking_recursion, recursion_limit_exceeded, unbound_capture,
    undeclared_recursion, unknown_rule,
};

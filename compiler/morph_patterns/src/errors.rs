//! Error types for matching, rewriting and reduction.
//!
//! "No match" is not an error: the matcher returns `None` and the reducer
//! turns it into the rule's terminal result. Everything here is a real
//! failure that the host decides how to surface.
//!
//! Factory functions (`unbound_capture()`, `recursion_limit_exceeded()`, ...)
//! are the public way to build errors; they fill in the structured kind.

use std::fmt;

use morph_ir::{CycleError, Name, Term, TermKind};

/// Result of a rewrite or reduction.
pub type ReduceResult = Result<Term, ReduceError>;

/// Which limit a runaway reduction hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Limit {
    /// Nested (non-tail) rule applications.
    Depth,
    /// Reducer steps (one per rule input tried) across the whole reduction.
    Steps,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Depth => f.write_str("depth"),
            Limit::Steps => f.write_str("step"),
        }
    }
}

/// Typed error category.
///
/// Prior art: Rust `InterpError` (`InvalidProgram` vs `ResourceExhaustion`),
/// which is roughly how these split: authoring defects (`UnboundCapture`,
/// `UndeclaredRecursion`, `NonShrinkingRecursion`, `KindMismatch`,
/// `NoEnclosingRule`), undefined results (`ArithmeticUndefined`), bad input
/// (`CyclicTerm`) and exhaustion (`RecursionLimitExceeded`).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReduceErrorKind {
    #[error("template references unbound capture `{name}`")]
    UnboundCapture { name: Name },

    #[error("arithmetic result is undefined: {reason}")]
    ArithmeticUndefined { reason: String },

    #[error("reduction {limit} limit exceeded (limit: {max})")]
    RecursionLimitExceeded { limit: Limit, max: usize },

    #[error("term `{name}` contains itself")]
    CyclicTerm { name: Name },

    #[error("rule `{rule}` fed back a term that is not smaller than its input")]
    NonShrinkingRecursion { rule: Name },

    #[error("rule `{rule}` re-enters itself but is not declared recursive")]
    UndeclaredRecursion { rule: Name },

    #[error("expected {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("`reduce` used outside of a rule")]
    NoEnclosingRule,

    #[error("unknown rule `{name}`")]
    UnknownRule { name: String },

    #[error("rule `{rule}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        rule: &'static str,
        expected: usize,
        got: usize,
    },
}

/// Reduction error: a structured kind plus the chain of rules it passed
/// through on the way out (innermost first).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReduceError {
    pub kind: ReduceErrorKind,
    pub trail: Vec<Name>,
}

impl ReduceError {
    pub fn new(kind: ReduceErrorKind) -> Self {
        ReduceError {
            kind,
            trail: Vec::new(),
        }
    }

    /// Record that the error left the given rule. Consecutive frames of the
    /// same rule collapse into one entry.
    #[must_use]
    pub fn in_rule(mut self, rule: &Name) -> Self {
        if self.trail.last() != Some(rule) {
            self.trail.push(rule.clone());
        }
        self
    }

    /// Resource exhaustion rather than a defect in the rules or input.
    pub fn is_exhaustion(&self) -> bool {
        matches!(self.kind, ReduceErrorKind::RecursionLimitExceeded { .. })
    }
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.trail.is_empty() {
            f.write_str(" (in ")?;
            for (i, rule) in self.trail.iter().enumerate() {
                if i > 0 {
                    f.write_str(" <- ")?;
                }
                write!(f, "{rule}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl std::error::Error for ReduceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<ReduceErrorKind> for ReduceError {
    fn from(kind: ReduceErrorKind) -> Self {
        ReduceError::new(kind)
    }
}

impl From<CycleError> for ReduceError {
    fn from(err: CycleError) -> Self {
        cyclic_term(err.name)
    }
}

// Factory functions

#[cold]
pub fn unbound_capture(name: &Name) -> ReduceError {
    ReduceError::new(ReduceErrorKind::UnboundCapture { name: name.clone() })
}

#[cold]
pub fn arithmetic_undefined(reason: impl Into<String>) -> ReduceError {
    ReduceError::new(ReduceErrorKind::ArithmeticUndefined {
        reason: reason.into(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: Limit, max: usize) -> ReduceError {
    ReduceError::new(ReduceErrorKind::RecursionLimitExceeded { limit, max })
}

#[cold]
pub fn cyclic_term(name: Name) -> ReduceError {
    ReduceError::new(ReduceErrorKind::CyclicTerm { name })
}

#[cold]
pub fn non_shrinking_recursion(rule: &Name) -> ReduceError {
    ReduceError::new(ReduceErrorKind::NonShrinkingRecursion { rule: rule.clone() })
}

#[cold]
pub fn undeclared_recursion(rule: &Name) -> ReduceError {
    ReduceError::new(ReduceErrorKind::UndeclaredRecursion { rule: rule.clone() })
}

#[cold]
pub fn kind_mismatch(expected: &'static str, found: &Term) -> ReduceError {
    ReduceError::new(ReduceErrorKind::KindMismatch {
        expected,
        found: found.kind().as_str(),
    })
}

#[cold]
pub fn expected_kind(expected: TermKind, found: &Term) -> ReduceError {
    kind_mismatch(expected.as_str(), found)
}

#[cold]
pub fn no_enclosing_rule() -> ReduceError {
    ReduceError::new(ReduceErrorKind::NoEnclosingRule)
}

#[cold]
pub fn unknown_rule(name: &str) -> ReduceError {
    ReduceError::new(ReduceErrorKind::UnknownRule {
        name: name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(rule: &'static str, expected: usize, got: usize) -> ReduceError {
    ReduceError::new(ReduceErrorKind::ArityMismatch {
        rule,
        expected,
        got,
    })
}

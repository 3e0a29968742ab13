//! Morph Rules - the library of named rewrite rules.
//!
//! Rules are grouped by what they do:
//! - [`extract`]: pull one part out of a term (`first`, `parameters`, ...)
//! - [`restructure`]: reassemble parts into a new shape (`push`, `zip`,
//!   `camel_case`, mapped composites, ...)
//! - [`recursive`]: repeat until a base case (`reverse`, `replace_all`,
//!   `trim`, `deep_readonly`, ...)
//! - [`unary`]: arithmetic over sequence lengths
//!
//! Each rule is registered in [`RuleRegistry`] under a [`RuleKind`]. The
//! [`Engine`] ties the registry to a declarations table and a reduction mode.

pub mod extract;
pub mod recursive;
mod registry;
pub mod restructure;
pub mod unary;

use std::sync::Once;

use morph_ir::{Declarations, Rule, Term};
use morph_patterns::{unknown_rule, MemoTable, ReduceError, ReduceMode, ReduceResult, Reducer};

pub use registry::{BuiltinRule, RuleDefinition, RuleKind, RuleRegistry};
pub use unary::Arithmetic;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debugging.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=morph_patterns=debug` or `RUST_LOG=morph_patterns=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Applies library rules to terms.
///
/// Every call starts a fresh [`Reducer`] with the engine's mode. When a memo
/// table is enabled it is shared by all calls, so repeated sub-reductions
/// (the `to_unary` calls of arithmetic, for instance) are computed once.
pub struct Engine {
    registry: RuleRegistry,
    decls: Declarations,
    mode: ReduceMode,
    memo: Option<MemoTable>,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_mode(ReduceMode::default())
    }

    pub fn with_mode(mode: ReduceMode) -> Self {
        Engine {
            registry: RuleRegistry::new(),
            decls: Declarations::new(),
            mode,
            memo: None,
        }
    }

    /// Resolve references in inputs through `decls`.
    #[must_use]
    pub fn with_declarations(mut self, decls: Declarations) -> Self {
        self.decls = decls;
        self
    }

    /// Keep a memo table across calls.
    #[must_use]
    pub fn with_memo(mut self) -> Self {
        self.memo = Some(MemoTable::new());
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn declarations(&self) -> &Declarations {
        &self.decls
    }

    pub fn mode(&self) -> &ReduceMode {
        &self.mode
    }

    pub fn memo(&self) -> Option<&MemoTable> {
        self.memo.as_ref()
    }

    /// Instantiate a library rule.
    ///
    /// Arguments are checked for reference cycles through the engine's
    /// declarations, since they end up inside the rule's patterns and
    /// templates.
    pub fn rule(&self, kind: RuleKind, args: &[Term]) -> Result<Rule, ReduceError> {
        for arg in args {
            self.decls.check_acyclic(arg)?;
        }
        self.registry.get(kind).build(args)
    }

    /// Build the library rule `kind` with `args` and reduce `input` with it.
    pub fn apply(&mut self, kind: RuleKind, args: &[Term], input: &Term) -> ReduceResult {
        let rule = self.rule(kind, args)?;
        self.reduce(input, &rule)
    }

    /// Like [`Engine::apply`], looking the rule up by name.
    pub fn apply_named(&mut self, name: &str, args: &[Term], input: &Term) -> ReduceResult {
        let kind = RuleKind::from_name(name).ok_or_else(|| unknown_rule(name))?;
        self.apply(kind, args, input)
    }

    /// Reduce `input` with any rule, library or not.
    pub fn reduce(&mut self, input: &Term, rule: &Rule) -> ReduceResult {
        let mut reducer = Reducer::with_mode(&self.decls, self.mode.clone());
        if let Some(memo) = self.memo.as_mut() {
            reducer = reducer.with_memo(memo);
        }
        reducer.reduce(input, rule)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

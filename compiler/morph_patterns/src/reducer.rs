//! The recursive reducer.
//!
//! [`Reducer::reduce`] runs one rule to a result. Each step tries the rule's
//! arms in order: the first arm whose pattern matches and whose guard holds
//! builds the next term, and when no arm applies the rule's terminal policy
//! decides the outcome.
//!
//! An arm whose whole template is `Reduce(t)` is a tail step: the reducer's
//! loop feeds `t` back into the rule without nesting, so accumulator-style
//! rules run in constant stack. Any other `Reduce` or `Call` nests a new rule
//! frame, bounded by the mode's depth limit and run under
//! `ensure_sufficient_stack`.

use morph_ir::{Declarations, Recursion, Rule, Template, Term, Terminal};
use morph_stack::{ensure_sufficient_stack, remaining_stack};

use crate::errors::{arithmetic_undefined, non_shrinking_recursion, ReduceError, ReduceResult};
use crate::frames::RuleStack;
use crate::matcher::match_term;
use crate::memo::MemoTable;
use crate::mode::{ReduceCounters, ReduceMode, ReduceState};
use crate::rewriter::{build, check_guard, Reentry};
use crate::validate::validate_rule;

/// Drives match → rewrite cycles until a rule produces its result.
pub struct Reducer<'a> {
    decls: &'a Declarations,
    mode: ReduceMode,
    state: ReduceState,
    stack: RuleStack,
    memo: Option<&'a mut MemoTable>,
}

enum Step {
    /// Final result of the current rule frame.
    Done(Term),
    /// Feed the term back into the same rule.
    Again(Term),
}

impl<'a> Reducer<'a> {
    pub fn new(decls: &'a Declarations) -> Self {
        Self::with_mode(decls, ReduceMode::default())
    }

    pub fn with_mode(decls: &'a Declarations, mode: ReduceMode) -> Self {
        Reducer {
            decls,
            state: ReduceState::new(&mode),
            stack: RuleStack::new(mode.max_recursion_depth()),
            mode,
            memo: None,
        }
    }

    /// Reuse (and record) results in `memo`.
    #[must_use]
    pub fn with_memo(mut self, memo: &'a mut MemoTable) -> Self {
        self.memo = Some(memo);
        self
    }

    pub fn enable_counters(&mut self) {
        self.state.enable_counters();
    }

    pub fn counters(&self) -> Option<&ReduceCounters> {
        self.state.counters()
    }

    pub fn mode(&self) -> &ReduceMode {
        &self.mode
    }

    /// Reducer steps taken so far, across all reductions by this reducer.
    pub fn steps(&self) -> usize {
        self.state.steps
    }

    /// Reduce `term` with `rule`.
    ///
    /// The term is checked for reference cycles and the rule (with every rule
    /// it calls) is validated before the first step.
    #[tracing::instrument(level = "debug", skip_all, fields(rule = %rule.name))]
    pub fn reduce(&mut self, term: &Term, rule: &Rule) -> ReduceResult {
        if self.stack.is_empty() {
            self.decls.check_acyclic(term)?;
            validate_rule(rule)?;
        }
        let result = self.apply(rule, term.clone());
        if let Err(err) = &result {
            tracing::debug!(error = %err, steps = self.state.steps, "reduction failed");
        }
        result
    }

    /// Run `rule` on `term` in a new frame.
    fn apply(&mut self, rule: &Rule, term: Term) -> ReduceResult {
        let hit = self
            .memo
            .as_deref()
            .and_then(|memo| memo.get(rule, &term).cloned());
        if let Some(hit) = hit {
            self.state.count_memo_hit();
            return Ok(hit);
        }

        self.stack
            .push(&rule.name)
            .map_err(|err| err.in_rule(&rule.name))?;
        self.state.count_nested_call(self.stack.depth());
        tracing::trace!(
            rule = %rule.name,
            depth = self.stack.depth(),
            remaining_stack = ?remaining_stack(),
            "enter frame"
        );
        let input = self.memo.is_some().then(|| term.clone());
        let result = ensure_sufficient_stack(|| self.run(rule, term));
        self.stack.pop();
        let output = result.map_err(|err| err.in_rule(&rule.name))?;

        if let (Some(input), Some(memo)) = (input, self.memo.as_deref_mut()) {
            memo.insert(rule, input, output.clone());
        }
        Ok(output)
    }

    fn run(&mut self, rule: &Rule, term: Term) -> ReduceResult {
        let mut current = term;
        loop {
            self.state.check_budget()?;
            match self.step(rule, &current)? {
                Step::Done(result) => return Ok(result),
                Step::Again(next) => {
                    check_shrinking(rule, &current, &next)?;
                    self.state.count_tail_step();
                    tracing::trace!(rule = %rule.name, term = %next, "tail step");
                    current = next;
                }
            }
        }
    }

    fn step(&mut self, rule: &Rule, term: &Term) -> Result<Step, ReduceError> {
        for (index, arm) in rule.arms.iter().enumerate() {
            self.state.count_match_attempt();
            let Some(captures) = match_term(term, &arm.pattern, self.decls) else {
                continue;
            };
            let mut frame = Frame {
                reducer: &mut *self,
                rule,
                input: term,
            };
            if let Some(guard) = &arm.guard {
                if !check_guard(guard, &captures, &mut frame)? {
                    tracing::trace!(rule = %rule.name, arm = index, "guard rejected");
                    continue;
                }
            }
            tracing::trace!(rule = %rule.name, arm = index, "arm matched");
            frame.reducer.state.count_arm_taken();
            return match &arm.body {
                Template::Reduce(inner) => build(inner, &captures, &mut frame).map(Step::Again),
                body => build(body, &captures, &mut frame).map(Step::Done),
            };
        }
        terminal(rule, term).map(Step::Done)
    }
}

fn terminal(rule: &Rule, term: &Term) -> ReduceResult {
    tracing::debug!(rule = %rule.name, terminal = ?rule.terminal, "no arm applies");
    match &rule.terminal {
        Terminal::Input => Ok(term.clone()),
        Terminal::Term(result) => Ok(result.clone()),
        Terminal::Unmatched => Ok(Term::never()),
        Terminal::Undefined(reason) => Err(arithmetic_undefined(reason.as_str())),
    }
}

fn check_shrinking(rule: &Rule, input: &Term, next: &Term) -> Result<(), ReduceError> {
    if rule.recursion == Recursion::Shrinking && next.size() >= input.size() {
        tracing::debug!(rule = %rule.name, input = %input, next = %next, "recursion did not shrink");
        return Err(non_shrinking_recursion(&rule.name));
    }
    Ok(())
}

/// Reentry for templates evaluated inside a rule frame.
struct Frame<'r, 'a> {
    reducer: &'r mut Reducer<'a>,
    rule: &'r Rule,
    input: &'r Term,
}

impl Reentry for Frame<'_, '_> {
    fn decls(&self) -> &Declarations {
        self.reducer.decls
    }

    fn reduce_self(&mut self, term: Term) -> ReduceResult {
        check_shrinking(self.rule, self.input, &term)?;
        self.reducer.apply(self.rule, term)
    }

    fn call(&mut self, rule: &Rule, term: Term) -> ReduceResult {
        self.reducer.apply(rule, term)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

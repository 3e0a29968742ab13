//! Injected memo table for reductions.
//!
//! Reduction is pure, so a rule applied to the same term always yields the
//! same result. A host that reduces many similar terms can hand a reducer a
//! [`MemoTable`] to reuse results across calls. There is no global cache:
//! the host owns the table and decides when to clear it.

use rustc_hash::FxHashMap;

use morph_ir::{Rule, Term};

/// Results keyed by (rule, input term).
///
/// Rules are compared structurally, arms included, so two rules sharing a
/// name but differing in any arm never share entries.
#[derive(Clone, Debug, Default)]
pub struct MemoTable {
    entries: FxHashMap<Rule, FxHashMap<Term, Term>>,
}

impl MemoTable {
    pub fn new() -> Self {
        MemoTable {
            entries: FxHashMap::default(),
        }
    }

    pub fn get(&self, rule: &Rule, input: &Term) -> Option<&Term> {
        self.entries.get(rule)?.get(input)
    }

    pub fn insert(&mut self, rule: &Rule, input: Term, output: Term) {
        if let Some(results) = self.entries.get_mut(rule) {
            results.insert(input, output);
            return;
        }
        let mut results = FxHashMap::default();
        results.insert(input, output);
        self.entries.insert(rule.clone(), results);
    }

    /// Number of cached (rule, input) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests;

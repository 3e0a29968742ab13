//! Declared shapes.
//!
//! The host hands the engine terms derived from its own static declarations.
//! Those declarations may refer to each other by name (`Term::Ref`), which is
//! the only way a term can become self-referential. [`Declarations`] stores
//! them, resolves references, and rejects cycles before reduction starts.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Name, Term};

/// A named shape reached itself through references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleError {
    /// First declaration found on the cycle.
    pub name: Name,
}

/// Table of named shapes, addressable through `Term::Ref`.
#[derive(Clone, Debug, Default)]
pub struct Declarations {
    shapes: FxHashMap<Name, Term>,
}

impl Declarations {
    pub fn new() -> Self {
        Declarations {
            shapes: FxHashMap::default(),
        }
    }

    /// Declare (or redeclare) a named shape.
    pub fn declare(&mut self, name: impl Into<Name>, shape: Term) {
        self.shapes.insert(name.into(), shape);
    }

    pub fn get(&self, name: &str) -> Option<&Term> {
        self.shapes.get(name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Follow a chain of references to the first non-reference term.
    ///
    /// Undeclared references resolve to themselves and behave as opaque
    /// tokens. An alias chain that loops also stops at a reference; callers
    /// that need a guarantee run [`check_acyclic`](Self::check_acyclic) first.
    pub fn resolve<'t>(&'t self, term: &'t Term) -> &'t Term {
        let mut current = term;
        // A chain longer than the table must revisit a name.
        for _ in 0..=self.shapes.len() {
            match current {
                Term::Ref(name) => match self.shapes.get(name.as_str()) {
                    Some(target) => current = target,
                    None => return current,
                },
                _ => return current,
            }
        }
        current
    }

    /// Reject `term` if expanding its references would never terminate.
    pub fn check_acyclic(&self, term: &Term) -> Result<(), CycleError> {
        let mut visiting = FxHashSet::default();
        let mut done = FxHashSet::default();
        self.visit(term, &mut visiting, &mut done)
    }

    /// Check every declared shape.
    pub fn check_all(&self) -> Result<(), CycleError> {
        let mut visiting = FxHashSet::default();
        let mut done = FxHashSet::default();
        let mut entries: Vec<(&Name, &Term)> = self.shapes.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (name, shape) in entries {
            if done.contains(name.as_str()) {
                continue;
            }
            visiting.insert(name.as_str());
            self.visit(shape, &mut visiting, &mut done)?;
            visiting.remove(name.as_str());
            done.insert(name.as_str());
        }
        Ok(())
    }

    fn visit<'s>(
        &'s self,
        term: &'s Term,
        visiting: &mut FxHashSet<&'s str>,
        done: &mut FxHashSet<&'s str>,
    ) -> Result<(), CycleError> {
        if let Term::Ref(name) = term {
            let Some((key, target)) = self.shapes.get_key_value(name.as_str()) else {
                return Ok(());
            };
            if done.contains(key.as_str()) {
                return Ok(());
            }
            if !visiting.insert(key.as_str()) {
                return Err(CycleError { name: key.clone() });
            }
            self.visit(target, visiting, done)?;
            visiting.remove(key.as_str());
            done.insert(key.as_str());
            return Ok(());
        }

        let mut result = Ok(());
        term.for_each_child(|child| {
            if result.is_ok() {
                result = self.visit(child, visiting, done);
            }
        });
        result
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

//! Capture sets.
//!
//! A [`CaptureSet`] is produced fresh by every successful match and consumed
//! by one rewrite. Nothing mutates it after matching except the composite
//! mapper, which layers the per-entry key and value on a clone.

use rustc_hash::FxHashMap;

use morph_ir::{Name, Term, KEY_BINDING, VALUE_BINDING};

use crate::errors::{unbound_capture, ReduceError};

/// Named sub-terms bound by one match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureSet {
    bindings: FxHashMap<Name, Term>,
}

impl CaptureSet {
    pub fn new() -> Self {
        CaptureSet {
            bindings: FxHashMap::default(),
        }
    }

    /// Bind `name` to `term`.
    ///
    /// Returns `false` when the name is already bound to a different term, in
    /// which case the match attempt must fail. Rebinding an equal term is a
    /// no-op.
    #[must_use]
    pub fn bind(&mut self, name: &Name, term: Term) -> bool {
        match self.bindings.get(name) {
            Some(existing) => *existing == term,
            None => {
                self.bindings.insert(name.clone(), term);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Term> {
        self.bindings.get(name)
    }

    /// Like [`get`](Self::get), but a missing name is an `UnboundCapture` error.
    pub fn require(&self, name: &Name) -> Result<&Term, ReduceError> {
        self.bindings
            .get(name)
            .ok_or_else(|| unbound_capture(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Term)> {
        self.bindings.iter()
    }

    /// This set plus the current composite entry, shadowing any outer
    /// `key`/`value` capture.
    pub fn with_entry(&self, key: &Name, value: &Term) -> CaptureSet {
        let mut scoped = self.clone();
        scoped
            .bindings
            .insert(Name::from(KEY_BINDING), Term::text(key.as_str()));
        scoped
            .bindings
            .insert(Name::from(VALUE_BINDING), value.clone());
        scoped
    }
}

impl<K: Into<Name>> FromIterator<(K, Term)> for CaptureSet {
    fn from_iter<I: IntoIterator<Item = (K, Term)>>(iter: I) -> Self {
        CaptureSet {
            bindings: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests;

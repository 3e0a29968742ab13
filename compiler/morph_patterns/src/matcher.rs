//! Structural pattern matching.
//!
//! [`match_term`] decomposes a term against a [`Pattern`] and returns the
//! captures of the match, or `None` (no match). Matching is total: a failed
//! attempt never leaks partial captures, and alternation commits only the
//! captures of the alternative that succeeded.
//!
//! References are resolved through the host's [`Declarations`] before any
//! structural test, so a pattern sees through named shapes. `Bind` always
//! captures the term as written.

use std::borrow::Cow;
use std::ops::Range;

use smallvec::SmallVec;

use morph_ir::{
    Composite, Declarations, FieldPattern, FieldPresence, FunctionPattern, FunctionShape, Pattern,
    SeqPattern, Term,
};

use crate::assign::is_assignable;
use crate::captures::CaptureSet;
use crate::text::match_text;

/// Match `term` against `pattern`.
pub fn match_term(term: &Term, pattern: &Pattern, decls: &Declarations) -> Option<CaptureSet> {
    let mut captures = CaptureSet::new();
    Matcher { decls }
        .matches(term, pattern, &mut captures)
        .then_some(captures)
}

struct Matcher<'d> {
    decls: &'d Declarations,
}

impl Matcher<'_> {
    fn matches(&self, term: &Term, pattern: &Pattern, captures: &mut CaptureSet) -> bool {
        match pattern {
            Pattern::Any => true,
            Pattern::Bind(name) => captures.bind(name, term.clone()),
            Pattern::As(name, inner) => {
                self.matches(term, inner, captures) && captures.bind(name, term.clone())
            }
            Pattern::Literal(expected) => {
                term == expected || self.decls.resolve(term) == self.decls.resolve(expected)
            }
            Pattern::Kind(kind) => self.decls.resolve(term).kind() == *kind,
            Pattern::Fits(target) => is_assignable(term, target, self.decls),
            Pattern::Alt(alternatives) => {
                for alternative in alternatives {
                    let mut trial = captures.clone();
                    if self.matches(term, alternative, &mut trial) {
                        *captures = trial;
                        return true;
                    }
                }
                false
            }
            Pattern::Seq(shape) => match self.decls.resolve(term) {
                Term::Seq(items) => self.match_split(
                    items.len(),
                    shape,
                    captures,
                    |i| Cow::Borrowed(&items[i]),
                    |range| Term::Seq(items[range].to_vec()),
                ),
                _ => false,
            },
            Pattern::Chars(shape) => match self.decls.resolve(term) {
                Term::Text(text) => {
                    let chars: SmallVec<[char; 32]> = text.chars().collect();
                    self.match_split(
                        chars.len(),
                        shape,
                        captures,
                        |i| Cow::Owned(Term::Text(chars[i].to_string())),
                        |range| Term::Text(chars[range].iter().collect()),
                    )
                }
                _ => false,
            },
            Pattern::Text(shape) => match self.decls.resolve(term) {
                Term::Text(text) => match_text(text, shape, captures),
                _ => false,
            },
            Pattern::Composite(fields) => match self.decls.resolve(term) {
                Term::Composite(composite) => fields
                    .iter()
                    .all(|fp| self.match_field(composite, fp, captures)),
                _ => false,
            },
            Pattern::Apply { head, args } => match self.decls.resolve(term) {
                Term::Apply {
                    head: actual,
                    args: actual_args,
                } => {
                    actual == head
                        && actual_args.len() == args.len()
                        && actual_args
                            .iter()
                            .zip(args)
                            .all(|(arg, p)| self.matches(arg, p, captures))
                }
                _ => false,
            },
            Pattern::Function(shape) => match self.decls.resolve(term) {
                Term::Function(actual) => self.match_function(actual, shape, captures),
                _ => false,
            },
        }
    }

    /// Match `[prefix..., ...rest, suffix...]` against `len` elements.
    fn match_split<'t>(
        &self,
        len: usize,
        shape: &SeqPattern,
        captures: &mut CaptureSet,
        element: impl Fn(usize) -> Cow<'t, Term>,
        middle: impl FnOnce(Range<usize>) -> Term,
    ) -> bool {
        let anchors = shape.anchor_len();
        let fits = match shape.rest {
            Some(_) => len >= anchors,
            None => len == anchors,
        };
        if !fits {
            return false;
        }

        let suffix_start = len - shape.suffix.len();
        let prefix_ok = shape
            .prefix
            .iter()
            .enumerate()
            .all(|(i, p)| self.matches(&element(i), p, captures));
        if !prefix_ok {
            return false;
        }
        let suffix_ok = shape
            .suffix
            .iter()
            .enumerate()
            .all(|(j, p)| self.matches(&element(suffix_start + j), p, captures));
        if !suffix_ok {
            return false;
        }
        match &shape.rest {
            Some(rest) => self.matches(&middle(shape.prefix.len()..suffix_start), rest, captures),
            None => true,
        }
    }

    fn match_field(
        &self,
        composite: &Composite,
        pattern: &FieldPattern,
        captures: &mut CaptureSet,
    ) -> bool {
        match (composite.get(pattern.key.as_str()), pattern.presence) {
            (Some(field), FieldPresence::Required) if field.is_optional() => false,
            (Some(field), _) => self.matches(&field.value, &pattern.value, captures),
            (None, FieldPresence::MaybeAbsent) => {
                self.matches(&Term::unknown(), &pattern.value, captures)
            }
            (None, _) => false,
        }
    }

    fn match_function(
        &self,
        actual: &FunctionShape,
        pattern: &FunctionPattern,
        captures: &mut CaptureSet,
    ) -> bool {
        if actual.kind != pattern.kind {
            return false;
        }
        if let Some(this_pattern) = &pattern.this {
            let receiver = actual.this.clone().unwrap_or_else(Term::unknown);
            if !self.matches(&receiver, this_pattern, captures) {
                return false;
            }
        }
        self.matches(&Term::Seq(actual.params.clone()), &pattern.params, captures)
            && self.matches(&actual.ret, &pattern.ret, captures)
    }
}

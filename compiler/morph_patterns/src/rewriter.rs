//! Template evaluation.
//!
//! [`rewrite`] builds a new term from the captures of one match. The two
//! re-entrant template nodes go through a [`Reentry`]: inside the reducer that
//! is the active rule frame, for the free function it is a standalone context
//! where `Call` starts a fresh reduction and a bare `Reduce` has no rule to
//! re-enter.

use morph_ir::{
    Atom, Declarations, FunctionShape, Guard, Rule, SeqItem, Template, Term, TermKind, TextPiece,
};

use crate::assign::{is_assignable, mutually_assignable};
use crate::captures::CaptureSet;
use crate::composite::map_entries;
use crate::errors::{
    arithmetic_undefined, expected_kind, kind_mismatch, no_enclosing_rule, ReduceError,
    ReduceResult,
};
use crate::reducer::Reducer;

/// How a template re-enters reduction.
pub trait Reentry {
    fn decls(&self) -> &Declarations;

    /// Reduce `term` with the enclosing rule.
    fn reduce_self(&mut self, term: Term) -> ReduceResult;

    /// Reduce `term` with another rule.
    fn call(&mut self, rule: &Rule, term: Term) -> ReduceResult;
}

/// Build the term described by `template` from `captures`.
///
/// `Call` nodes run a nested reduction with default limits; `Reduce` fails
/// with `NoEnclosingRule`.
pub fn rewrite(captures: &CaptureSet, template: &Template) -> ReduceResult {
    let decls = Declarations::new();
    rewrite_in(captures, template, &decls)
}

/// [`rewrite`] with references resolved through `decls`.
pub fn rewrite_in(captures: &CaptureSet, template: &Template, decls: &Declarations) -> ReduceResult {
    build(template, captures, &mut Standalone { decls })
}

struct Standalone<'d> {
    decls: &'d Declarations,
}

impl Reentry for Standalone<'_> {
    fn decls(&self) -> &Declarations {
        self.decls
    }

    fn reduce_self(&mut self, _term: Term) -> ReduceResult {
        Err(no_enclosing_rule())
    }

    fn call(&mut self, rule: &Rule, term: Term) -> ReduceResult {
        Reducer::new(self.decls).reduce(&term, rule)
    }
}

pub(crate) fn build(
    template: &Template,
    captures: &CaptureSet,
    cx: &mut dyn Reentry,
) -> ReduceResult {
    match template {
        Template::Capture(name) => captures.require(name).cloned(),
        Template::Literal(term) => Ok(term.clone()),
        Template::Seq(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    SeqItem::Elem(t) => out.push(build(t, captures, cx)?),
                    SeqItem::Splice(t) => {
                        let spliced = build(t, captures, cx)?;
                        match cx.decls().resolve(&spliced) {
                            Term::Seq(elems) => out.extend(elems.iter().cloned()),
                            other => return Err(expected_kind(TermKind::Seq, other)),
                        }
                    }
                }
            }
            Ok(Term::Seq(out))
        }
        Template::Text(pieces) => {
            let mut out = String::new();
            for piece in pieces {
                match piece {
                    TextPiece::Lit(text) => out.push_str(text),
                    TextPiece::Insert(t) => {
                        let fragment = build(t, captures, cx)?;
                        push_fragment(&mut out, cx.decls().resolve(&fragment))?;
                    }
                }
            }
            Ok(Term::Text(out))
        }
        Template::Case(op, inner) => {
            let term = build(inner, captures, cx)?;
            match cx.decls().resolve(&term) {
                Term::Text(text) => Ok(Term::Text(op.apply(text))),
                other => Err(expected_kind(TermKind::Text, other)),
            }
        }
        Template::Length(inner) => {
            let term = build(inner, captures, cx)?;
            let resolved = cx.decls().resolve(&term);
            resolved
                .len()
                .map(Term::count)
                .ok_or_else(|| kind_mismatch("sequence or text", resolved))
        }
        Template::Apply { head, args } => {
            let args = args
                .iter()
                .map(|arg| build(arg, captures, cx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Term::Apply {
                head: head.clone(),
                args,
            })
        }
        Template::Function(shape) => {
            let this = match &shape.this {
                Some(t) => Some(build(t, captures, cx)?),
                None => None,
            };
            let params = build(&shape.params, captures, cx)?;
            let params = match cx.decls().resolve(&params) {
                Term::Seq(items) => items.clone(),
                other => return Err(expected_kind(TermKind::Seq, other)),
            };
            let ret = build(&shape.ret, captures, cx)?;
            Ok(Term::Function(Box::new(FunctionShape {
                kind: shape.kind,
                this,
                params,
                ret,
            })))
        }
        Template::Map(map) => map_entries(map, captures, cx),
        Template::Reduce(inner) => {
            let term = build(inner, captures, cx)?;
            cx.reduce_self(term)
        }
        Template::Call(rule, inner) => {
            let term = build(inner, captures, cx)?;
            cx.call(rule, term)
        }
        Template::Undefined(reason) => Err(arithmetic_undefined(reason.as_str())),
    }
}

fn push_fragment(out: &mut String, fragment: &Term) -> Result<(), ReduceError> {
    match fragment {
        Term::Text(text) => out.push_str(text),
        Term::Atom(Atom::Int(n)) => out.push_str(&n.to_string()),
        Term::Atom(Atom::Bool(b)) => out.push_str(if *b { "true" } else { "false" }),
        other => return Err(expected_kind(TermKind::Text, other)),
    }
    Ok(())
}

/// Evaluate a guard against `captures`.
pub(crate) fn check_guard(
    guard: &Guard,
    captures: &CaptureSet,
    cx: &mut dyn Reentry,
) -> Result<bool, ReduceError> {
    match guard {
        Guard::Equal(a, b) => {
            let a = build(a, captures, cx)?;
            let b = build(b, captures, cx)?;
            Ok(mutually_assignable(&a, &b, cx.decls()))
        }
        Guard::Fits(sub, sup) => {
            let sub = build(sub, captures, cx)?;
            let sup = build(sup, captures, cx)?;
            Ok(is_assignable(&sub, &sup, cx.decls()))
        }
        Guard::Not(inner) => Ok(!check_guard(inner, captures, cx)?),
        Guard::All(guards) => {
            for g in guards {
                if !check_guard(g, captures, cx)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests;

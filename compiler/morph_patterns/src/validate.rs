//! Construction-time rule checks.
//!
//! A rule is rejected before it ever runs when:
//! - an arm's guard or template uses a capture its pattern does not bind
//!   (`UnboundCapture`); inside a map template `key` and `value` are bound too;
//! - an arm re-enters the rule but the rule is declared `Recursion::None`
//!   (`UndeclaredRecursion`).
//!
//! Rules nested in `Call` templates are checked the same way.

use rustc_hash::FxHashSet;

use morph_ir::{
    Guard, Name, Recursion, Rule, SeqItem, Template, TextPiece, KEY_BINDING, VALUE_BINDING,
};

use crate::errors::{unbound_capture, undeclared_recursion, ReduceError};

/// Check `rule` and every rule it calls.
pub fn validate_rule(rule: &Rule) -> Result<(), ReduceError> {
    if rule.recursion == Recursion::None && rule.is_self_referential() {
        return Err(undeclared_recursion(&rule.name));
    }
    for arm in &rule.arms {
        let bound = arm.pattern.bound_names();
        let guard_ok = match &arm.guard {
            Some(guard) => check_guard(guard, &bound),
            None => Ok(()),
        };
        guard_ok
            .and_then(|()| check_template(&arm.body, &bound))
            .map_err(|err| err.in_rule(&rule.name))?;
    }
    Ok(())
}

fn check_template(template: &Template, bound: &FxHashSet<Name>) -> Result<(), ReduceError> {
    match template {
        Template::Capture(name) => {
            if bound.contains(name) {
                Ok(())
            } else {
                Err(unbound_capture(name))
            }
        }
        Template::Literal(_) | Template::Undefined(_) => Ok(()),
        Template::Seq(items) => items.iter().try_for_each(|item| match item {
            SeqItem::Elem(t) | SeqItem::Splice(t) => check_template(t, bound),
        }),
        Template::Text(pieces) => pieces.iter().try_for_each(|piece| match piece {
            TextPiece::Lit(_) => Ok(()),
            TextPiece::Insert(t) => check_template(t, bound),
        }),
        Template::Case(_, inner) | Template::Length(inner) | Template::Reduce(inner) => {
            check_template(inner, bound)
        }
        Template::Apply { args, .. } => args.iter().try_for_each(|t| check_template(t, bound)),
        Template::Function(shape) => {
            if let Some(this) = &shape.this {
                check_template(this, bound)?;
            }
            check_template(&shape.params, bound)?;
            check_template(&shape.ret, bound)
        }
        Template::Map(map) => {
            check_template(&map.source, bound)?;
            let mut scoped = bound.clone();
            scoped.insert(Name::from(KEY_BINDING));
            scoped.insert(Name::from(VALUE_BINDING));
            if let Some(key) = &map.key {
                check_template(key, &scoped)?;
            }
            if let Some(filter) = &map.filter {
                check_guard(filter, &scoped)?;
            }
            check_template(&map.value, &scoped)
        }
        Template::Call(rule, inner) => {
            check_template(inner, bound)?;
            validate_rule(rule)
        }
    }
}

fn check_guard(guard: &Guard, bound: &FxHashSet<Name>) -> Result<(), ReduceError> {
    match guard {
        Guard::Equal(a, b) | Guard::Fits(a, b) => {
            check_template(a, bound)?;
            check_template(b, bound)
        }
        Guard::Not(inner) => check_guard(inner, bound),
        Guard::All(guards) => guards.iter().try_for_each(|g| check_guard(g, bound)),
    }
}

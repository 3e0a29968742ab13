//! Extraction rules: pull one part out of a term.
//!
//! Each rule is a single arm whose pattern does the work. A term of the
//! wrong shape falls through to the `never` sentinel, except where noted.

use morph_ir::{
    FieldPattern, FieldPresence, FnKind, Name, Pattern, Rule, Segment, Template, Term, Terminal,
    TextPiece,
};

/// `[first, ...]` → `first`.
pub fn first() -> Rule {
    Rule::new("first")
        .arm(
            Pattern::head(Pattern::bind("first"), Pattern::Any),
            Template::capture("first"),
        )
        .terminal(Terminal::Unmatched)
}

/// `[..., last]` → `last`.
pub fn last() -> Rule {
    Rule::new("last")
        .arm(
            Pattern::tail(Pattern::Any, Pattern::bind("last")),
            Template::capture("last"),
        )
        .terminal(Terminal::Unmatched)
}

/// `[_, ...middle, _]` → `middle`.
pub fn slice() -> Rule {
    Rule::new("slice")
        .arm(
            Pattern::slice(vec![Pattern::Any], Pattern::bind("middle"), vec![Pattern::Any]),
            Template::capture("middle"),
        )
        .terminal(Terminal::Unmatched)
}

/// `Promise<V>` → `V`, one level.
pub fn promise_value() -> Rule {
    Rule::new("promise_value")
        .arm(
            Pattern::apply("Promise", [Pattern::bind("value")]),
            Template::capture("value"),
        )
        .terminal(Terminal::Unmatched)
}

pub fn parameters() -> Rule {
    signature_part("parameters", FnKind::Call, Part::Params)
}

pub fn return_type() -> Rule {
    signature_part("return_type", FnKind::Call, Part::Ret)
}

pub fn constructor_parameters() -> Rule {
    signature_part("constructor_parameters", FnKind::Construct, Part::Params)
}

pub fn instance_type() -> Rule {
    signature_part("instance_type", FnKind::Construct, Part::Ret)
}

/// Receiver of a call signature. Signatures without one yield `unknown`.
pub fn this_parameter() -> Rule {
    Rule::new("this_parameter")
        .arm(
            Pattern::method(Pattern::bind("this"), Pattern::Any, Pattern::Any),
            Template::capture("this"),
        )
        .terminal(Terminal::Unmatched)
}

#[derive(Copy, Clone)]
enum Part {
    Params,
    Ret,
}

fn signature_part(name: &'static str, kind: FnKind, part: Part) -> Rule {
    let (params, ret) = match part {
        Part::Params => (Pattern::bind("part"), Pattern::Any),
        Part::Ret => (Pattern::Any, Pattern::bind("part")),
    };
    Rule::new(name)
        .arm(Pattern::function(kind, params, ret), Template::capture("part"))
        .terminal(Terminal::Unmatched)
}

/// Value of field `key`, optional or not. Composites without the key fall
/// through to `never`.
pub fn prop_type(key: &str) -> Rule {
    Rule::new("prop_type")
        .arm(
            Pattern::Composite(vec![FieldPattern {
                key: Name::from(key),
                presence: FieldPresence::Declared,
                value: Pattern::bind("value"),
            }]),
            Template::capture("value"),
        )
        .terminal(Terminal::Unmatched)
}

/// `true` when the text starts with `prefix`, `false` otherwise.
pub fn starts_with(prefix: &str) -> Rule {
    Rule::new("starts_with")
        .arm(
            Pattern::text([Segment::lit(prefix), Segment::Hole]),
            Template::lit(true),
        )
        .terminal(Terminal::Term(Term::bool(false)))
}

/// Replace the first occurrence of `from` with `to`.
pub fn replace(from: &str, to: &str) -> Rule {
    Rule::new("replace")
        .arm(
            Pattern::text([
                Segment::capture("prefix"),
                Segment::lit(from),
                Segment::capture("suffix"),
            ]),
            Template::text([
                TextPiece::insert(Template::capture("prefix")),
                TextPiece::lit(to),
                TextPiece::insert(Template::capture("suffix")),
            ]),
        )
        .terminal(Terminal::Unmatched)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

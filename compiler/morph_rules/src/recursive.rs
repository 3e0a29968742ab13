//! Recursive rules: repeat a match and rewrite until a base case.
//!
//! Rules whose fed-back term is a proper part of the input are declared
//! `Recursion::Shrinking`, so the reducer rejects any step that fails to make
//! progress. Accumulator rules, which grow part of their state, are
//! `Recursion::Bounded` and rely on the reducer's limits.

use morph_ir::{
    Guard, MapTemplate, ModifierEdit, Pattern, Recursion, Rule, Segment, SeqItem, Template, Term,
    TermKind, Terminal, TextPiece, VALUE_BINDING,
};

const WHITESPACE: [&str; 3] = [" ", "\n", "\t"];

/// Unwrap nested `Promise<…>` down to the innermost value.
pub fn deep_promise() -> Rule {
    Rule::new("deep_promise")
        .arm(
            Pattern::apply("Promise", [Pattern::bind("value")]),
            Template::reduce(Template::capture("value")),
        )
        .recursion(Recursion::Shrinking)
}

pub fn reverse() -> Rule {
    Rule::new("reverse")
        .arm(
            Pattern::tail(Pattern::bind("init"), Pattern::bind("last")),
            Template::seq([
                SeqItem::elem(Template::capture("last")),
                SeqItem::splice(Template::reduce(Template::capture("init"))),
            ]),
        )
        .recursion(Recursion::Shrinking)
}

/// Whether some element is mutually assignable with `target`.
pub fn includes(target: Term) -> Rule {
    Rule::new("includes")
        .guarded_arm(
            Pattern::head(Pattern::bind("first"), Pattern::Any),
            Guard::equal(Template::capture("first"), Template::lit(target)),
            Template::lit(true),
        )
        .arm(
            Pattern::head(Pattern::Any, Pattern::bind("rest")),
            Template::reduce(Template::capture("rest")),
        )
        .terminal(Terminal::Term(Term::bool(false)))
        .recursion(Recursion::Shrinking)
}

/// Drop every element equal to `item`, keeping order.
pub fn remove_all(item: Term) -> Rule {
    Rule::new("remove_all")
        .arm(
            Pattern::bind_as("items", Pattern::Kind(TermKind::Seq)),
            Template::call(
                remove_all_into(item),
                Template::seq([
                    SeqItem::elem(Template::capture("items")),
                    SeqItem::elem(Template::lit(Term::empty_seq())),
                ]),
            ),
        )
        .terminal(Terminal::Unmatched)
}

/// `[items, kept]`: move each element not equal to `item` onto `kept`.
fn remove_all_into(item: Term) -> Rule {
    let step = |kept: Template| {
        Template::reduce(Template::seq([
            SeqItem::elem(Template::capture("rest")),
            SeqItem::elem(kept),
        ]))
    };
    Rule::new("remove_all_into")
        .guarded_arm(
            Pattern::tuple([
                Pattern::head(Pattern::bind("first"), Pattern::bind("rest")),
                Pattern::bind("kept"),
            ]),
            Guard::equal(Template::capture("first"), Template::lit(item)),
            step(Template::capture("kept")),
        )
        .arm(
            Pattern::tuple([
                Pattern::head(Pattern::bind("first"), Pattern::bind("rest")),
                Pattern::bind("kept"),
            ]),
            step(Template::seq([
                SeqItem::splice(Template::capture("kept")),
                SeqItem::elem(Template::capture("first")),
            ])),
        )
        .arm(
            Pattern::tuple([Pattern::empty_seq(), Pattern::bind("kept")]),
            Template::capture("kept"),
        )
        .recursion(Recursion::Bounded)
}

/// Replace every occurrence of `from` with `to`, scanning left to right.
///
/// Replacements are never rescanned: only the suffix after each match is
/// fed back.
pub fn replace_all(from: &str, to: &str) -> Rule {
    Rule::new("replace_all")
        .arm(
            Pattern::text([
                Segment::capture("prefix"),
                Segment::lit(from),
                Segment::capture("suffix"),
            ]),
            Template::text([
                TextPiece::insert(Template::capture("prefix")),
                TextPiece::lit(to),
                TextPiece::insert(Template::reduce(Template::capture("suffix"))),
            ]),
        )
        .recursion(Recursion::Shrinking)
}

pub fn trim_left() -> Rule {
    Rule::new("trim_left")
        .arm(
            Pattern::text([Segment::one_of(WHITESPACE), Segment::capture("rest")]),
            Template::reduce(Template::capture("rest")),
        )
        .recursion(Recursion::Shrinking)
}

pub fn trim_right() -> Rule {
    Rule::new("trim_right")
        .arm(
            Pattern::text([Segment::capture("rest"), Segment::one_of(WHITESPACE)]),
            Template::reduce(Template::capture("rest")),
        )
        .recursion(Recursion::Shrinking)
}

pub fn trim() -> Rule {
    Rule::new("trim").arm(
        Pattern::bind_as("text", Pattern::Kind(TermKind::Text)),
        Template::call(
            trim_right(),
            Template::call(trim_left(), Template::capture("text")),
        ),
    )
}

pub fn reverse_str() -> Rule {
    Rule::new("reverse_str")
        .arm(
            Pattern::first_char(Pattern::bind("first"), Pattern::bind("rest")),
            Template::text([
                TextPiece::insert(Template::reduce(Template::capture("rest"))),
                TextPiece::insert(Template::capture("first")),
            ]),
        )
        .recursion(Recursion::Shrinking)
}

/// Mark every field readonly, at every composite level.
///
/// Values reached through references may be larger than the reference
/// itself, so progress is not checked per step; declarations are acyclic,
/// which bounds the walk.
pub fn deep_readonly() -> Rule {
    let mut map = MapTemplate::over(Template::capture("obj"));
    map.readonly = ModifierEdit::Add;
    map.value = Template::reduce(Template::capture(VALUE_BINDING));
    Rule::new("deep_readonly")
        .arm(
            Pattern::bind_as("obj", Pattern::Kind(TermKind::Composite)),
            Template::map(map),
        )
        .recursion(Recursion::Bounded)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

//! Restructuring rules: reassemble captured parts into a new shape.

use morph_ir::{
    CaseOp, FnKind, FunctionTemplate, Guard, MapTemplate, ModifierEdit, Pattern, Recursion, Rule,
    Segment, SeqItem, Template, Term, TermKind, Terminal, TextPiece, KEY_BINDING, VALUE_BINDING,
};

pub fn push(item: Term) -> Rule {
    Rule::new("push")
        .arm(
            Pattern::bind_as("items", Pattern::Kind(TermKind::Seq)),
            Template::seq([
                SeqItem::splice(Template::capture("items")),
                SeqItem::elem(Template::lit(item)),
            ]),
        )
        .terminal(Terminal::Unmatched)
}

pub fn unshift(item: Term) -> Rule {
    Rule::new("unshift")
        .arm(
            Pattern::bind_as("items", Pattern::Kind(TermKind::Seq)),
            Template::seq([
                SeqItem::elem(Template::lit(item)),
                SeqItem::splice(Template::capture("items")),
            ]),
        )
        .terminal(Terminal::Unmatched)
}

/// Pair the input's elements with `other`'s.
///
/// Sequences of different lengths zip to `[]`.
pub fn zip(other: &[Term]) -> Rule {
    Rule::new("zip")
        .guarded_arm(
            Pattern::bind_as("left", Pattern::Kind(TermKind::Seq)),
            Guard::equal(
                Template::length(Template::capture("left")),
                Template::lit(Term::count(other.len())),
            ),
            Template::call(
                zip_pairs(),
                Template::seq([
                    SeqItem::elem(Template::capture("left")),
                    SeqItem::elem(Template::lit(Term::seq(other.iter().cloned()))),
                ]),
            ),
        )
        .arm(Pattern::Kind(TermKind::Seq), Template::lit(Term::empty_seq()))
        .terminal(Terminal::Unmatched)
}

fn zip_pairs() -> Rule {
    Rule::new("zip_pairs")
        .arm(
            Pattern::tuple([
                Pattern::head(Pattern::bind("x"), Pattern::bind("xs")),
                Pattern::head(Pattern::bind("y"), Pattern::bind("ys")),
            ]),
            Template::seq([
                SeqItem::elem(Template::seq([
                    SeqItem::elem(Template::capture("x")),
                    SeqItem::elem(Template::capture("y")),
                ])),
                SeqItem::splice(Template::reduce(Template::seq([
                    SeqItem::elem(Template::capture("xs")),
                    SeqItem::elem(Template::capture("ys")),
                ]))),
            ]),
        )
        .terminal(Terminal::Term(Term::empty_seq()))
        .recursion(Recursion::Shrinking)
}

/// Upper-case the first character.
pub fn capitalize() -> Rule {
    Rule::new("capitalize").arm(
        Pattern::first_char(Pattern::bind("first"), Pattern::bind("rest")),
        Template::text([
            TextPiece::insert(Template::case(CaseOp::Upper, Template::capture("first"))),
            TextPiece::insert(Template::capture("rest")),
        ]),
    )
}

/// `snake_case_text` → `snakeCaseText`.
pub fn camel_case() -> Rule {
    Rule::new("camel_case")
        .arm(
            Pattern::text([
                Segment::capture("left"),
                Segment::lit("_"),
                Segment::capture("right"),
            ]),
            Template::text([
                TextPiece::insert(Template::capture("left")),
                TextPiece::insert(Template::case(
                    CaseOp::Capitalize,
                    Template::reduce(Template::capture("right")),
                )),
            ]),
        )
        .recursion(Recursion::Shrinking)
}

/// Drop every trailing occurrence of `sub`.
pub fn drop_substr(sub: &str) -> Rule {
    Rule::new("drop_substr")
        .arm(
            Pattern::text([Segment::capture("prefix"), Segment::lit(sub)]),
            Template::reduce(Template::capture("prefix")),
        )
        .recursion(Recursion::Shrinking)
}

/// Add `arg` as the last parameter of a call signature.
pub fn append_argument(arg: Term) -> Rule {
    Rule::new("append_argument")
        .arm(
            Pattern::function(FnKind::Call, Pattern::bind("params"), Pattern::bind("ret")),
            Template::Function(Box::new(FunctionTemplate {
                kind: FnKind::Call,
                this: None,
                params: Template::seq([
                    SeqItem::splice(Template::capture("params")),
                    SeqItem::elem(Template::lit(arg)),
                ]),
                ret: Template::capture("ret"),
            })),
        )
        .terminal(Terminal::Unmatched)
}

// Mapped composites

fn map_rule(name: &'static str, edit: impl FnOnce(&mut MapTemplate)) -> Rule {
    let mut map = MapTemplate::over(Template::capture("obj"));
    edit(&mut map);
    Rule::new(name).arm(
        Pattern::bind_as("obj", Pattern::Kind(TermKind::Composite)),
        Template::map(map),
    )
}

/// Every value `v` becomes `[v, v, v]`.
pub fn mapping_triple() -> Rule {
    map_rule("mapping_triple", |map| {
        let value = || SeqItem::elem(Template::capture(VALUE_BINDING));
        map.value = Template::seq([value(), value(), value()]);
    })
}

pub fn uppercase_keys() -> Rule {
    map_rule("uppercase_keys", |map| {
        map.key = Some(Template::case(CaseOp::Upper, Template::capture(KEY_BINDING)));
    })
}

pub fn readonly() -> Rule {
    map_rule("readonly", |map| map.readonly = ModifierEdit::Add)
}

pub fn partial() -> Rule {
    map_rule("partial", |map| map.optional = ModifierEdit::Add)
}

pub fn mutable() -> Rule {
    map_rule("mutable", |map| map.readonly = ModifierEdit::Remove)
}

pub fn required() -> Rule {
    map_rule("required", |map| map.optional = ModifierEdit::Remove)
}

/// Keep the fields whose value `value_type` fits.
pub fn filter_by_value_type(value_type: Term) -> Rule {
    map_rule("filter_by_value_type", |map| {
        map.filter = Some(Guard::fits(
            Template::lit(value_type),
            Template::capture(VALUE_BINDING),
        ));
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

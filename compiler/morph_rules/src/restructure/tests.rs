use super::*;
use morph_ir::{Composite, Declarations, Field, Modifiers, Name, Prim};
use morph_patterns::{ReduceErrorKind, Reducer};
use pretty_assertions::assert_eq;

fn run(rule: &Rule, input: &Term) -> Term {
    let decls = Declarations::new();
    Reducer::new(&decls).reduce(input, rule).unwrap()
}

fn nums(ns: &[i64]) -> Term {
    Term::seq(ns.iter().copied().map(Term::int))
}

fn person() -> Term {
    let mut c = Composite::new();
    c.insert("name", Field::plain(Term::prim(Prim::String)));
    c.insert(
        "age",
        Field {
            value: Term::prim(Prim::Number),
            modifiers: Modifiers::READONLY,
        },
    );
    c.insert(
        "hobbies",
        Field {
            value: Term::seq([Term::prim(Prim::String)]),
            modifiers: Modifiers::OPTIONAL,
        },
    );
    Term::Composite(c)
}

fn field(term: &Term, key: &str) -> Field {
    term.as_composite()
        .and_then(|c| c.get(key))
        .cloned()
        .unwrap()
}

#[test]
fn push_and_unshift() {
    assert_eq!(run(&push(Term::int(4)), &nums(&[1, 2, 3])), nums(&[1, 2, 3, 4]));
    assert_eq!(run(&unshift(Term::int(0)), &nums(&[1, 2, 3])), nums(&[0, 1, 2, 3]));
    assert_eq!(run(&push(Term::int(1)), &Term::empty_seq()), nums(&[1]));
    assert!(run(&push(Term::int(1)), &Term::text("no")).is_never());
}

#[test]
fn zip_pairs_equal_lengths() {
    let zipped = run(&zip(&[Term::text("guang"), Term::text("dong")]), &nums(&[1, 2]));
    assert_eq!(
        zipped,
        Term::seq([
            Term::seq([Term::int(1), Term::text("guang")]),
            Term::seq([Term::int(2), Term::text("dong")]),
        ])
    );
    assert_eq!(run(&zip(&[]), &Term::empty_seq()), Term::empty_seq());
}

#[test]
fn zip_of_mismatched_lengths_is_empty() {
    let other = [Term::text("a"), Term::text("b")];
    assert_eq!(run(&zip(&other), &nums(&[1, 2, 3])), Term::empty_seq());
    assert_eq!(run(&zip(&other), &nums(&[1])), Term::empty_seq());
}

#[test]
fn capitalize_first_character() {
    assert_eq!(run(&capitalize(), &Term::text("guang")), Term::text("Guang"));
    assert_eq!(run(&capitalize(), &Term::text("")), Term::text(""));
}

#[test]
fn camel_case_every_segment() {
    assert_eq!(run(&camel_case(), &Term::text("hi_hi_hi")), Term::text("hiHiHi"));
    assert_eq!(
        run(&camel_case(), &Term::text("dong_dong_dong")),
        Term::text("dongDongDong")
    );
    assert_eq!(run(&camel_case(), &Term::text("plain")), Term::text("plain"));
}

#[test]
fn drop_substr_strips_trailing_repeats() {
    assert_eq!(
        run(&drop_substr("~"), &Term::text("hello~~~")),
        Term::text("hello")
    );
    assert_eq!(run(&drop_substr("~"), &Term::text("a~b")), Term::text("a~b"));
}

#[test]
fn empty_substring_does_not_shrink() {
    let decls = Declarations::new();
    let err = Reducer::new(&decls)
        .reduce(&Term::text("abc"), &drop_substr(""))
        .unwrap_err();
    assert_eq!(
        err.kind,
        ReduceErrorKind::NonShrinkingRecursion {
            rule: Name::from("drop_substr")
        }
    );
}

#[test]
fn append_argument_extends_parameters() {
    let f = Term::function([Term::prim(Prim::String)], Term::prim(Prim::Boolean));
    assert_eq!(
        run(&append_argument(Term::prim(Prim::Number)), &f),
        Term::function(
            [Term::prim(Prim::String), Term::prim(Prim::Number)],
            Term::prim(Prim::Boolean)
        )
    );
    assert!(run(&append_argument(Term::int(1)), &nums(&[1])).is_never());
}

#[test]
fn mapping_triple_repeats_values() {
    let obj = Term::composite([("a", Term::int(1)), ("b", Term::int(2))]);
    assert_eq!(
        run(&mapping_triple(), &obj),
        Term::composite([("a", nums(&[1, 1, 1])), ("b", nums(&[2, 2, 2]))])
    );
}

#[test]
fn uppercase_keys_keeps_modifiers() {
    let out = run(&uppercase_keys(), &person());
    let keys: Vec<_> = out
        .as_composite()
        .unwrap()
        .keys()
        .map(Name::as_str)
        .map(str::to_owned)
        .collect();
    assert_eq!(keys, ["NAME", "AGE", "HOBBIES"]);
    assert_eq!(field(&out, "AGE").modifiers, Modifiers::READONLY);
}

#[test]
fn modifier_rules() {
    let all_readonly = run(&readonly(), &person());
    assert!(field(&all_readonly, "name").is_readonly());
    assert!(field(&all_readonly, "hobbies").is_optional());

    let all_optional = run(&partial(), &person());
    assert!(field(&all_optional, "name").is_optional());
    assert!(field(&all_optional, "age").is_readonly());

    let writable = run(&mutable(), &person());
    assert!(!field(&writable, "age").is_readonly());

    let all_required = run(&required(), &person());
    assert!(!field(&all_required, "hobbies").is_optional());
    assert!(field(&all_required, "age").is_readonly());
}

#[test]
fn filter_by_value_type_keeps_fitting_fields() {
    let out = run(&filter_by_value_type(Term::prim(Prim::String)), &person());
    assert_eq!(out, Term::composite([("name", Term::prim(Prim::String))]));

    let loose = Term::composite([
        ("id", Term::prim(Prim::Number)),
        ("extra", Term::unknown()),
        ("label", Term::text("x")),
    ]);
    let out = run(&filter_by_value_type(Term::prim(Prim::Number)), &loose);
    assert_eq!(
        out,
        Term::composite([("id", Term::prim(Prim::Number)), ("extra", Term::unknown())])
    );
}

#[test]
fn mapped_rules_pass_non_composites_through() {
    assert_eq!(run(&readonly(), &Term::int(1)), Term::int(1));
}

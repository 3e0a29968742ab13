use super::*;
use morph_ir::{Composite, Declarations, Field, Modifiers, Prim};
use morph_patterns::{ReduceErrorKind, ReduceMode, Reducer};
use pretty_assertions::assert_eq;

fn run(rule: &Rule, input: &Term) -> Term {
    let decls = Declarations::new();
    Reducer::new(&decls).reduce(input, rule).unwrap()
}

fn nums(ns: &[i64]) -> Term {
    Term::seq(ns.iter().copied().map(Term::int))
}

fn promise(inner: Term) -> Term {
    Term::apply("Promise", [inner])
}

#[test]
fn deep_promise_unwraps_every_level() {
    let nested = promise(promise(promise(Term::composite([("a", Term::int(1))]))));
    assert_eq!(
        run(&deep_promise(), &nested),
        Term::composite([("a", Term::int(1))])
    );
    assert_eq!(run(&deep_promise(), &Term::int(1)), Term::int(1));
}

#[test]
fn reverse_sequences() {
    assert_eq!(run(&reverse(), &nums(&[1, 2, 3, 4, 5])), nums(&[5, 4, 3, 2, 1]));
    assert_eq!(run(&reverse(), &Term::empty_seq()), Term::empty_seq());
}

#[test]
fn includes_uses_mutual_assignability() {
    let xs = nums(&[1, 2, 3, 4, 5]);
    assert_eq!(run(&includes(Term::int(4)), &xs), Term::bool(true));
    assert_eq!(run(&includes(Term::int(9)), &xs), Term::bool(false));
    assert_eq!(run(&includes(Term::int(1)), &Term::empty_seq()), Term::bool(false));

    // `number` is not mutually assignable with a number literal.
    let wide = Term::seq([Term::prim(Prim::Number)]);
    assert_eq!(run(&includes(Term::int(1)), &wide), Term::bool(false));
    assert_eq!(
        run(&includes(Term::prim(Prim::Number)), &wide),
        Term::bool(true)
    );
}

#[test]
fn remove_all_keeps_order() {
    assert_eq!(
        run(&remove_all(Term::int(2)), &nums(&[1, 2, 2, 3, 2])),
        nums(&[1, 3])
    );
    assert_eq!(run(&remove_all(Term::int(7)), &nums(&[1, 2])), nums(&[1, 2]));
    assert_eq!(
        run(&remove_all(Term::int(1)), &Term::empty_seq()),
        Term::empty_seq()
    );
}

#[test]
fn replace_all_does_not_rescan_replacements() {
    assert_eq!(
        run(
            &replace_all("?", "world"),
            &Term::text("hello ? nihao ?")
        ),
        Term::text("hello world nihao world")
    );
    assert_eq!(
        run(&replace_all("a", "aa"), &Term::text("banana")),
        Term::text("baanaanaa")
    );
    assert_eq!(run(&replace_all("x", "y"), &Term::text("abc")), Term::text("abc"));
}

#[test]
fn replace_all_with_empty_separator_is_rejected() {
    let decls = Declarations::new();
    let err = Reducer::new(&decls)
        .reduce(&Term::text("abc"), &replace_all("", "-"))
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ReduceErrorKind::NonShrinkingRecursion { .. }
    ));
}

#[test]
fn trimming() {
    let padded = Term::text("  \tstr \n  ");
    assert_eq!(run(&trim_left(), &padded), Term::text("str \n  "));
    assert_eq!(run(&trim_right(), &padded), Term::text("  \tstr"));
    assert_eq!(run(&trim(), &padded), Term::text("str"));
    assert_eq!(run(&trim(), &Term::text("   ")), Term::text(""));
}

#[test]
fn reverse_str_reverses_characters() {
    assert_eq!(run(&reverse_str(), &Term::text("abc")), Term::text("cba"));
    assert_eq!(run(&reverse_str(), &Term::text("")), Term::text(""));
    assert_eq!(run(&reverse_str(), &Term::text("héllo")), Term::text("olléh"));
}

#[test]
fn deep_readonly_marks_nested_fields() {
    let inner = Term::composite([("c", Term::prim(Prim::String))]);
    let outer = Term::composite([("a", Term::int(1)), ("b", inner)]);
    let out = run(&deep_readonly(), &outer);

    let Some(top) = out.as_composite() else {
        panic!("expected a composite");
    };
    assert!(top.iter().all(|(_, f)| f.is_readonly()));
    let nested = top.get("b").unwrap().value.as_composite().unwrap();
    assert!(nested.get("c").unwrap().is_readonly());
    assert_eq!(nested.get("c").unwrap().value, Term::prim(Prim::String));
}

#[test]
fn deep_readonly_follows_references() {
    let mut decls = Declarations::new();
    decls.declare("Inner", Term::composite([("x", Term::int(1))]));
    let outer = Term::composite([("inner", Term::reference("Inner"))]);
    let out = Reducer::new(&decls).reduce(&outer, &deep_readonly()).unwrap();

    let mut expected_inner = Composite::new();
    expected_inner.insert(
        "x",
        Field {
            value: Term::int(1),
            modifiers: Modifiers::READONLY,
        },
    );
    let mut expected = Composite::new();
    expected.insert(
        "inner",
        Field {
            value: Term::Composite(expected_inner),
            modifiers: Modifiers::READONLY,
        },
    );
    assert_eq!(out, Term::Composite(expected));
}

#[test]
fn deep_readonly_rejects_cyclic_shapes() {
    let mut decls = Declarations::new();
    decls.declare(
        "Node",
        Term::composite([("next", Term::reference("Node"))]),
    );
    let err = Reducer::with_mode(&decls, ReduceMode::TestRun)
        .reduce(&Term::reference("Node"), &deep_readonly())
        .unwrap_err();
    assert!(matches!(err.kind, ReduceErrorKind::CyclicTerm { .. }));
}

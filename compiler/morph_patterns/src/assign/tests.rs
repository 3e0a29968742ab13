use super::*;
use morph_ir::{Field, Modifiers};

fn decls() -> Declarations {
    Declarations::new()
}

#[test]
fn literals_fit_their_primitive() {
    let d = decls();
    assert!(is_assignable(&Term::int(3), &Term::prim(Prim::Number), &d));
    assert!(is_assignable(&Term::text("a"), &Term::prim(Prim::String), &d));
    assert!(is_assignable(&Term::bool(true), &Term::prim(Prim::Boolean), &d));
    assert!(!is_assignable(&Term::prim(Prim::Number), &Term::int(3), &d));
    assert!(!is_assignable(&Term::text("a"), &Term::prim(Prim::Number), &d));
}

#[test]
fn top_and_bottom() {
    let d = decls();
    assert!(is_assignable(&Term::text("x"), &Term::unknown(), &d));
    assert!(is_assignable(&Term::never(), &Term::int(1), &d));
    assert!(!is_assignable(&Term::unknown(), &Term::int(1), &d));
    assert!(!is_assignable(&Term::int(1), &Term::never(), &d));
}

#[test]
fn literal_and_primitive_are_not_equal() {
    let d = decls();
    assert!(!mutually_assignable(&Term::int(1), &Term::prim(Prim::Number), &d));
    assert!(mutually_assignable(&Term::int(1), &Term::int(1), &d));
}

#[test]
fn composite_width_and_optional_fields() {
    let d = decls();
    let wide = Term::composite([("a", Term::int(1)), ("b", Term::text("x"))]);
    let narrow = Term::composite([("a", Term::prim(Prim::Number))]);
    assert!(is_assignable(&wide, &narrow, &d));
    assert!(!is_assignable(&narrow, &wide, &d));

    let optional: Composite = [(
        "c",
        Field {
            value: Term::prim(Prim::String),
            modifiers: Modifiers::OPTIONAL,
        },
    )]
    .into_iter()
    .collect();
    assert!(is_assignable(&wide, &Term::Composite(optional.clone()), &d));

    let required = Term::composite([("c", Term::prim(Prim::String))]);
    assert!(!is_assignable(&Term::Composite(optional), &required, &d));
}

#[test]
fn function_parameters_are_contravariant() {
    let d = decls();
    let takes_number = Term::function([Term::prim(Prim::Number)], Term::int(1));
    let takes_one = Term::function([Term::int(1)], Term::prim(Prim::Number));
    assert!(is_assignable(&takes_number, &takes_one, &d));
    assert!(!is_assignable(&takes_one, &takes_number, &d));
}

#[test]
fn references_resolve_before_comparison() {
    let mut d = decls();
    d.declare("Id", Term::prim(Prim::Number));
    assert!(is_assignable(&Term::int(7), &Term::reference("Id"), &d));
    assert!(mutually_assignable(
        &Term::reference("Id"),
        &Term::prim(Prim::Number),
        &d
    ));
}

#[test]
fn sequences_compare_pairwise() {
    let d = decls();
    let a = Term::seq([Term::int(1), Term::text("a")]);
    let b = Term::seq([Term::prim(Prim::Number), Term::prim(Prim::String)]);
    assert!(is_assignable(&a, &b, &d));
    assert!(!is_assignable(&a, &Term::seq([Term::prim(Prim::Number)]), &d));
}

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn composite_equality_ignores_insertion_order() {
    let a = Term::composite([("name", Term::prim(Prim::String)), ("age", Term::int(2))]);
    let b = Term::composite([("age", Term::int(2)), ("name", Term::prim(Prim::String))]);
    assert_eq!(a, b);

    let mut hasher_a = rustc_hash::FxHasher::default();
    let mut hasher_b = rustc_hash::FxHasher::default();
    a.hash(&mut hasher_a);
    b.hash(&mut hasher_b);
    assert_eq!(hasher_a.finish(), hasher_b.finish());
}

#[test]
fn composite_insert_replaces_in_place() {
    let mut c = Composite::new();
    c.insert("a", Field::plain(Term::int(1)));
    c.insert("b", Field::plain(Term::int(2)));
    c.insert("a", Field::plain(Term::int(3)));

    let keys: Vec<_> = c.keys().map(Name::as_str).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(c.get("a").map(|f| &f.value), Some(&Term::int(3)));
}

#[test]
fn modifiers_distinguish_composites() {
    let mut readonly = Composite::new();
    readonly.insert(
        "name",
        Field {
            value: Term::prim(Prim::String),
            modifiers: Modifiers::READONLY,
        },
    );
    let plain = Term::composite([("name", Term::prim(Prim::String))]);
    assert_ne!(Term::Composite(readonly), plain);
}

#[test]
fn text_length_counts_characters() {
    assert_eq!(Term::text("héllo").len(), Some(5));
    assert_eq!(Term::seq([Term::int(1), Term::int(2)]).len(), Some(2));
    assert_eq!(Term::int(1).len(), None);
}

#[test]
fn size_shrinks_with_structure() {
    let whole = Term::seq([Term::int(1), Term::int(2), Term::int(3)]);
    let rest = Term::seq([Term::int(2), Term::int(3)]);
    assert!(rest.size() < whole.size());
    assert_eq!(Term::text("abc").size(), 4);
}

#[test]
fn unary_is_a_sequence_of_placeholders() {
    let three = Term::unary(3);
    assert_eq!(three.len(), Some(3));
    assert!(three
        .as_seq()
        .is_some_and(|items| items.iter().all(|t| *t == Term::unknown())));
}

#[test]
fn display_renders_shapes() {
    assert_eq!(
        Term::seq([Term::int(1), Term::text("a")]).to_string(),
        "[1, \"a\"]"
    );
    assert_eq!(
        Term::apply("Promise", [Term::text("hello")]).to_string(),
        "Promise<\"hello\">"
    );
    assert_eq!(
        Term::function([Term::prim(Prim::String)], Term::prim(Prim::Number)).to_string(),
        "(string) => number"
    );
    assert_eq!(
        Term::constructor([Term::prim(Prim::String)], Term::opaque("Person")).to_string(),
        "new (string) => Person"
    );

    let mut c = Composite::new();
    c.insert(
        "name",
        Field {
            value: Term::prim(Prim::String),
            modifiers: Modifiers::READONLY | Modifiers::OPTIONAL,
        },
    );
    assert_eq!(
        Term::Composite(c).to_string(),
        "{ readonly name?: string }"
    );
}

#[test]
fn for_each_child_visits_function_parts() {
    let method = Term::method(
        Term::opaque("Test"),
        [Term::prim(Prim::String)],
        Term::prim(Prim::Void),
    );
    let mut seen = Vec::new();
    method.for_each_child(|child| seen.push(child.clone()));
    assert_eq!(
        seen,
        vec![
            Term::opaque("Test"),
            Term::prim(Prim::String),
            Term::prim(Prim::Void)
        ]
    );
}

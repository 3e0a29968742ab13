use super::*;
use crate::errors::ReduceErrorKind;
use morph_ir::{
    CaseOp, Composite, Field, MapTemplate, ModifierEdit, Modifiers, Name, Pattern, Prim,
    Recursion, KEY_BINDING, VALUE_BINDING,
};
use pretty_assertions::assert_eq;

fn caps(entries: Vec<(&str, Term)>) -> CaptureSet {
    entries.into_iter().collect()
}

fn person() -> Term {
    let mut c = Composite::new();
    c.insert("name", Field::plain(Term::prim(Prim::String)));
    c.insert(
        "age",
        Field {
            value: Term::prim(Prim::Number),
            modifiers: Modifiers::READONLY | Modifiers::OPTIONAL,
        },
    );
    Term::Composite(c)
}

#[test]
fn sequence_template_splices_in_order() {
    let set = caps(vec![
        ("xs", Term::seq([Term::int(1), Term::int(2)])),
        ("y", Term::int(3)),
    ]);
    let t = Template::seq([
        SeqItem::elem(Template::capture("y")),
        SeqItem::splice(Template::capture("xs")),
        SeqItem::elem(Template::capture("y")),
    ]);
    assert_eq!(
        rewrite(&set, &t),
        Ok(Term::seq([Term::int(3), Term::int(1), Term::int(2), Term::int(3)]))
    );
}

#[test]
fn splicing_a_non_sequence_is_a_kind_mismatch() {
    let set = caps(vec![("x", Term::int(1))]);
    let t = Template::seq([SeqItem::splice(Template::capture("x"))]);
    assert_eq!(
        rewrite(&set, &t).map_err(|e| e.kind),
        Err(ReduceErrorKind::KindMismatch {
            expected: "sequence",
            found: "atom"
        })
    );
}

#[test]
fn text_template_applies_case_to_one_fragment() {
    let set = caps(vec![("l", Term::text("hi")), ("r", Term::text("there"))]);
    let t = Template::text([
        TextPiece::insert(Template::capture("l")),
        TextPiece::insert(Template::case(CaseOp::Capitalize, Template::capture("r"))),
        TextPiece::lit("!"),
    ]);
    assert_eq!(rewrite(&set, &t), Ok(Term::text("hiThere!")));
}

#[test]
fn numbers_render_into_text() {
    let set = caps(vec![("n", Term::int(42))]);
    let t = Template::text([TextPiece::lit("n="), TextPiece::insert(Template::capture("n"))]);
    assert_eq!(rewrite(&set, &t), Ok(Term::text("n=42")));
}

#[test]
fn length_of_sequence_and_text() {
    let set = caps(vec![("xs", Term::unary(4)), ("s", Term::text("héllo"))]);
    assert_eq!(
        rewrite(&set, &Template::length(Template::capture("xs"))),
        Ok(Term::int(4))
    );
    assert_eq!(
        rewrite(&set, &Template::length(Template::capture("s"))),
        Ok(Term::int(5))
    );
    assert!(rewrite(&set, &Template::length(Template::lit(Term::int(1)))).is_err());
}

#[test]
fn absent_capture_is_unbound() {
    assert_eq!(
        rewrite(&CaptureSet::new(), &Template::capture("x")).map_err(|e| e.kind),
        Err(ReduceErrorKind::UnboundCapture {
            name: Name::from("x")
        })
    );
}

#[test]
fn bare_reduce_has_no_enclosing_rule() {
    let set = caps(vec![("x", Term::int(1))]);
    assert_eq!(
        rewrite(&set, &Template::reduce(Template::capture("x"))).map_err(|e| e.kind),
        Err(ReduceErrorKind::NoEnclosingRule)
    );
}

#[test]
fn call_runs_a_fresh_reduction() {
    let count = Rule::new("count")
        .arm(
            Pattern::head(Pattern::Any, Pattern::bind("r")),
            Template::reduce(Template::capture("r")),
        )
        .terminal(morph_ir::Terminal::Term(Term::text("done")))
        .recursion(Recursion::Shrinking);
    let set = caps(vec![("xs", Term::unary(3))]);
    assert_eq!(
        rewrite(&set, &Template::call(count, Template::capture("xs"))),
        Ok(Term::text("done"))
    );
}

#[test]
fn undefined_template_fails() {
    assert_eq!(
        rewrite(&CaptureSet::new(), &Template::undefined("b > a")).map_err(|e| e.kind),
        Err(ReduceErrorKind::ArithmeticUndefined {
            reason: "b > a".into()
        })
    );
}

#[test]
fn map_renames_keys_and_edits_modifiers() {
    let set = caps(vec![("obj", person())]);
    let mut map = MapTemplate::over(Template::capture("obj"));
    map.key = Some(Template::case(CaseOp::Upper, Template::capture(KEY_BINDING)));
    map.readonly = ModifierEdit::Remove;
    map.optional = ModifierEdit::Add;

    let Ok(Term::Composite(out)) = rewrite(&set, &Template::map(map)) else {
        panic!("expected a composite");
    };
    assert_eq!(out.keys().map(Name::as_str).collect::<Vec<_>>(), ["NAME", "AGE"]);
    let age = out.get("AGE").cloned().unwrap_or_else(|| Field::plain(Term::never()));
    assert_eq!(age.modifiers, Modifiers::OPTIONAL);
    assert_eq!(age.value, Term::prim(Prim::Number));
}

#[test]
fn map_filter_and_never_key_drop_entries() {
    let set = caps(vec![("obj", person())]);

    let mut by_value = MapTemplate::over(Template::capture("obj"));
    by_value.filter = Some(Guard::fits(
        Template::capture(VALUE_BINDING),
        Template::lit(Prim::String),
    ));
    let kept = rewrite(&set, &Template::map(by_value));
    assert_eq!(kept, Ok(Term::composite([("name", Term::prim(Prim::String))])));

    let mut never_key = MapTemplate::over(Template::capture("obj"));
    never_key.key = Some(Template::lit(Prim::Never));
    assert_eq!(
        rewrite(&set, &Template::map(never_key)),
        Ok(Term::Composite(Composite::new()))
    );
}

#[test]
fn guards_combine() {
    let set = caps(vec![("x", Term::int(1))]);
    let mut cx = Standalone {
        decls: &Declarations::new(),
    };
    let is_number = Guard::fits(Template::capture("x"), Template::lit(Prim::Number));
    let is_one = Guard::equal(Template::capture("x"), Template::lit(Term::int(1)));
    let all = Guard::All(vec![is_number.clone(), is_one]);
    assert_eq!(check_guard(&all, &set, &mut cx), Ok(true));
    assert_eq!(
        check_guard(&Guard::Not(Box::new(is_number)), &set, &mut cx),
        Ok(false)
    );
}

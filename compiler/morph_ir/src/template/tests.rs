use super::*;
use pretty_assertions::assert_eq;

#[test]
fn capitalize_touches_first_character_only() {
    assert_eq!(CaseOp::Capitalize.apply("hello"), "Hello");
    assert_eq!(CaseOp::Capitalize.apply("hELLO"), "HELLO");
    assert_eq!(CaseOp::Uncapitalize.apply("Hello"), "hello");
    assert_eq!(CaseOp::Capitalize.apply(""), "");
}

#[test]
fn upper_and_lower_cover_whole_text() {
    assert_eq!(CaseOp::Upper.apply("name"), "NAME");
    assert_eq!(CaseOp::Lower.apply("NaMe"), "name");
}

#[test]
fn reduce_is_found_inside_splices() {
    let t = Template::seq([
        SeqItem::elem(Template::capture("last")),
        SeqItem::splice(Template::reduce(Template::capture("init"))),
    ]);
    assert!(t.reduces_self());
}

#[test]
fn reduce_inside_nested_rule_does_not_count() {
    let inner = Rule::new("inner").arm(
        crate::Pattern::bind("x"),
        Template::reduce(Template::capture("x")),
    );
    let t = Template::call(inner, Template::capture("x"));
    assert!(!t.reduces_self());
}

#[test]
fn map_value_can_reduce() {
    let mut map = MapTemplate::over(Template::capture("obj"));
    assert!(!Template::map(map.clone()).reduces_self());
    map.value = Template::reduce(Template::capture(VALUE_BINDING));
    assert!(Template::map(map).reduces_self());
}

use super::*;
use crate::errors::ReduceErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn rebinding_requires_equal_terms() {
    let mut set = CaptureSet::new();
    let x = Name::from("x");
    assert!(set.bind(&x, Term::int(1)));
    assert!(set.bind(&x, Term::int(1)));
    assert!(!set.bind(&x, Term::int(2)));
    assert_eq!(set.get("x"), Some(&Term::int(1)));
    assert_eq!(set.len(), 1);
}

#[test]
fn require_reports_unbound_name() {
    let set = CaptureSet::new();
    let err = set.require(&Name::from("missing")).err();
    assert_eq!(
        err.map(|e| e.kind),
        Some(ReduceErrorKind::UnboundCapture {
            name: Name::from("missing")
        })
    );
}

#[test]
fn entry_scope_shadows_outer_bindings() {
    let outer: CaptureSet = [("value", Term::int(0)), ("obj", Term::empty_seq())]
        .into_iter()
        .collect();
    let scoped = outer.with_entry(&Name::from("name"), &Term::text("Ann"));
    assert_eq!(scoped.get(KEY_BINDING), Some(&Term::text("name")));
    assert_eq!(scoped.get(VALUE_BINDING), Some(&Term::text("Ann")));
    assert!(scoped.contains("obj"));
    assert_eq!(outer.get(VALUE_BINDING), Some(&Term::int(0)));
}

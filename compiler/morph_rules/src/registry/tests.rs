use super::*;
use morph_patterns::ReduceErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn registry_has_all_rules() {
    let registry = RuleRegistry::new();
    assert_eq!(registry.len(), 45);
    assert!(!registry.is_empty());
    assert_eq!(registry.kinds().count(), registry.len());
}

#[test]
fn names_are_unique_and_round_trip() {
    let registry = RuleRegistry::new();
    let mut seen = std::collections::HashSet::new();
    for kind in registry.kinds() {
        let name = kind.name();
        assert!(seen.insert(name), "duplicate rule name {name}");
        assert_eq!(RuleKind::from_name(name), Some(kind));
    }
    assert_eq!(RuleKind::from_name("no_such_rule"), None);
}

#[test]
fn built_rules_carry_their_name() {
    let registry = RuleRegistry::new();
    for kind in registry.kinds() {
        let definition = registry.get(kind);
        let args: Vec<Term> = definition
            .params()
            .iter()
            .map(|_| Term::empty_seq())
            .collect();
        // Text parameters reject a sequence; every other rule must build.
        match definition.build(&args) {
            Ok(rule) => assert_eq!(rule.name.as_str(), definition.name()),
            Err(err) => assert!(
                matches!(err.kind, ReduceErrorKind::KindMismatch { expected: "text", .. }),
                "{} failed to build: {err}",
                definition.name()
            ),
        }
    }
}

#[test]
fn parameters_are_declared() {
    let registry = RuleRegistry::new();
    assert_eq!(registry.get(RuleKind::ReplaceAll).params(), ["from", "to"]);
    assert_eq!(registry.get(RuleKind::Includes).params(), ["target"]);
    assert!(registry.get(RuleKind::Reverse).params().is_empty());
}

#[test]
fn wrong_arity_is_reported() {
    let registry = RuleRegistry::new();
    let err = registry
        .get(RuleKind::ReplaceAll)
        .build(&[Term::text("?")])
        .unwrap_err();
    assert_eq!(
        err.kind,
        ReduceErrorKind::ArityMismatch {
            rule: "replace_all",
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn text_parameters_must_be_text() {
    let registry = RuleRegistry::new();
    let err = registry
        .get(RuleKind::StartsWith)
        .build(&[Term::int(1)])
        .unwrap_err();
    assert_eq!(
        err.kind,
        ReduceErrorKind::KindMismatch {
            expected: "text",
            found: "atom"
        }
    );
    let err = registry
        .get(RuleKind::Zip)
        .build(&[Term::text("ab")])
        .unwrap_err();
    assert_eq!(
        err.kind,
        ReduceErrorKind::KindMismatch {
            expected: "sequence",
            found: "text"
        }
    );
}

#[test]
fn malformed_definitions_fail_to_build() {
    fn leaky(_: &[Term]) -> Result<Rule, ReduceError> {
        Ok(Rule::new("leaky").arm(
            morph_ir::Pattern::head(morph_ir::Pattern::Any, morph_ir::Pattern::Any),
            morph_ir::Template::capture("rest"),
        ))
    }
    let definition = BuiltinRule {
        name: "leaky",
        params: &[],
        make: leaky,
    };
    let err = definition.build(&[]).unwrap_err();
    assert_eq!(
        err.kind,
        ReduceErrorKind::UnboundCapture {
            name: morph_ir::Name::from("rest")
        }
    );
}

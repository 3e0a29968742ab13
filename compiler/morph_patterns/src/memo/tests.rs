use super::*;
use morph_ir::{Pattern, Template};
use pretty_assertions::assert_eq;

fn identity() -> Rule {
    Rule::new("r").arm(Pattern::bind("x"), Template::capture("x"))
}

#[test]
fn entries_are_keyed_by_rule_and_input() {
    let mut memo = MemoTable::new();
    memo.insert(&identity(), Term::int(2), Term::int(4));
    assert_eq!(memo.get(&identity(), &Term::int(2)), Some(&Term::int(4)));
    assert_eq!(memo.get(&identity(), &Term::int(3)), None);
    memo.insert(&identity(), Term::int(3), Term::int(9));
    assert_eq!(memo.len(), 2);
    memo.clear();
    assert!(memo.is_empty());
}

#[test]
fn rules_with_the_same_name_do_not_share_entries() {
    let constant = Rule::new("r").arm(Pattern::bind("x"), Template::lit(Term::int(1)));
    let mut memo = MemoTable::new();
    memo.insert(&identity(), Term::int(2), Term::int(2));
    assert_eq!(memo.get(&constant, &Term::int(2)), None);

    memo.insert(&constant, Term::int(2), Term::int(1));
    assert_eq!(memo.get(&identity(), &Term::int(2)), Some(&Term::int(2)));
    assert_eq!(memo.get(&constant, &Term::int(2)), Some(&Term::int(1)));
    assert_eq!(memo.len(), 2);
}

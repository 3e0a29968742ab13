use super::*;
use crate::errors::ReduceErrorKind;
use pretty_assertions::assert_eq;

// === ReduceMode policy tests ===

#[test]
fn const_eval_depth_512() {
    assert_eq!(ReduceMode::ConstEval { budget: 10 }.max_recursion_depth(), 512);
}

#[test]
fn test_run_is_bounded() {
    assert_eq!(ReduceMode::TestRun.max_recursion_depth(), 2_000);
    assert_eq!(ReduceMode::TestRun.step_budget(), Some(100_000));
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn host_native_depth() {
    assert_eq!(ReduceMode::Host.max_recursion_depth(), 10_000);
}

#[test]
fn custom_limits_pass_through() {
    let mode = ReduceMode::Custom {
        max_depth: 7,
        budget: None,
    };
    assert_eq!(mode.max_recursion_depth(), 7);
    assert_eq!(mode.step_budget(), None);
}

#[test]
fn default_is_host() {
    assert_eq!(ReduceMode::default(), ReduceMode::Host);
}

#[test]
fn modes_are_hashable() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(ReduceMode::Host);
    set.insert(ReduceMode::ConstEval { budget: 100 });
    set.insert(ReduceMode::TestRun);
    set.insert(ReduceMode::ConstEval { budget: 100 });
    assert_eq!(set.len(), 3);
}

// === ReduceState tests ===

#[test]
fn budget_tracking() {
    let mut state = ReduceState::new(&ReduceMode::ConstEval { budget: 3 });
    assert!(state.check_budget().is_ok());
    assert!(state.check_budget().is_ok());
    assert!(state.check_budget().is_ok());
    let err = state.check_budget().unwrap_err();
    assert_eq!(
        err.kind,
        ReduceErrorKind::RecursionLimitExceeded {
            limit: Limit::Steps,
            max: 3
        }
    );
}

#[test]
fn unlimited_budget_still_counts_steps() {
    let mut state = ReduceState::new(&ReduceMode::Custom {
        max_depth: 1,
        budget: None,
    });
    for _ in 0..10 {
        assert!(state.check_budget().is_ok());
    }
    assert_eq!(state.steps, 10);
}

#[test]
fn counters_disabled_by_default() {
    let mut state = ReduceState::new(&ReduceMode::Host);
    state.count_match_attempt();
    assert!(state.counters().is_none());
}

#[test]
fn counters_increment_when_enabled() {
    let mut state = ReduceState::new(&ReduceMode::Host);
    state.enable_counters();
    state.count_match_attempt();
    state.count_match_attempt();
    state.count_arm_taken();
    state.count_nested_call(4);
    state.count_nested_call(2);
    state.count_memo_hit();
    let c = state.counters().unwrap();
    assert_eq!(c.match_attempts, 2);
    assert_eq!(c.arms_taken, 1);
    assert_eq!(c.nested_calls, 2);
    assert_eq!(c.max_depth, 4);
    assert_eq!(c.memo_hits, 1);
}

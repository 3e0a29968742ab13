use super::*;

#[test]
fn shallow_chain_returns_value() {
    fn depth(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    assert_eq!(depth(16), 16);
}

#[test]
fn deep_splice_chain_does_not_overflow() {
    // Mirrors `[x, ...f(rest)]`: the recursive result is used after the call returns.
    fn rebuild(n: usize) -> Vec<usize> {
        ensure_sufficient_stack(|| {
            if n == 0 {
                Vec::new()
            } else {
                let mut tail = rebuild(n - 1);
                tail.push(n);
                tail
            }
        })
    }

    assert_eq!(rebuild(100_000).len(), 100_000);
}

#[test]
fn passes_results_through() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Err("no match"));
    assert_eq!(result, Err("no match"));
}

#[test]
#[cfg(not(target_arch = "wasm32"))]
fn remaining_stack_is_reported_on_native() {
    assert!(remaining_stack().is_some());
}

use std::cell::RefCell;

use flow_rail::{iter, val};

#[test]
fn for_each_visits_in_order() {
    let out = RefCell::new(Vec::new());
    iter::for_each(vec!["a", "b", "c"], |s| out.borrow_mut().push(s.to_uppercase()));

    assert_eq!(*out.borrow(), vec!["A", "B", "C"]);
}

#[test]
fn for_each_runs_a_pipeline_per_item() {
    let mut accepted = Vec::new();
    iter::for_each(1..=5, |n: u32| {
        let flow = val(n).check(|x| x % 2 == 1, |x| format!("{x} is even"));
        if let Ok(odd) = flow.into_result() {
            accepted.push(odd);
        }
    });

    assert_eq!(accepted, vec![1, 3, 5]);
}

#[cfg(feature = "parallel")]
#[test]
fn par_for_each_builds_a_context_per_item() {
    use std::sync::Mutex;

    let results = Mutex::new(Vec::new());
    iter::par_for_each(0..64u32, |n| {
        let flow = val(n).map(|x| Ok(x * x));
        if let Ok(squared) = flow {
            if let Ok(mut results) = results.lock() {
                results.push(squared.unwrap_val());
            }
        }
    });

    let mut results = results.into_inner().unwrap();
    results.sort_unstable();
    assert_eq!(results.len(), 64);
    assert_eq!(results[63], 63 * 63);
}

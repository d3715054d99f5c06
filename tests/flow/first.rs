use std::cell::Cell;

use flow_rail::{err, first_val_or, first_val_or_last_err, flow::provider, val, Flow, NO_PROVIDERS};

use crate::support::dummy;

#[test]
fn returns_first_val_and_stops() {
    let calls = Cell::new(0);
    let count = |flow: Flow<u8>| {
        calls.set(calls.get() + 1);
        flow
    };

    let found = first_val_or_last_err([
        provider(|| count(err("a"))),
        provider(|| count(val(2))),
        provider(|| count(val(3))),
    ]);

    assert_eq!(found.unwrap_val(), 2);
    assert_eq!(calls.get(), 2);
}

#[test]
fn falls_back_to_the_last_err() {
    let found = first_val_or_last_err([
        provider(|| err::<u8>("first")),
        provider(|| err::<u8>("second")),
    ]);
    assert_eq!(found.unwrap_err(), "second");
}

#[test]
fn falls_back_to_the_given_message() {
    let found = first_val_or(
        [provider(|| err::<u8>("first")), provider(|| err::<u8>("second"))],
        "nothing worked",
    );
    assert_eq!(found.unwrap_err(), "nothing worked");
}

#[test]
fn empty_provider_list() {
    let providers: Vec<fn() -> Flow<u8>> = Vec::new();

    assert_eq!(first_val_or_last_err(providers.clone()).unwrap_err(), NO_PROVIDERS);
    assert_eq!(first_val_or(providers, "fallback").unwrap_err(), "fallback");
}

#[test]
fn fallback_err_keeps_the_last_context() {
    let resource = dummy();
    let held = resource.clone();

    let found = first_val_or(
        [provider(move || val(held).fail("rejected"))],
        "nothing worked",
    );

    assert!(found.context().owns(&resource.handle()));
    assert_eq!(found.release(), 1);
    assert!(resource.released());
}

#[test]
fn failed_providers_hand_their_resources_to_the_result() {
    let early = dummy();
    let late = dummy();
    let early_in = early.clone();
    let late_in = late.clone();

    let found = first_val_or_last_err([
        provider(move || val(early_in).fail("early rejected")),
        provider(move || val(late_in).fail("late rejected")),
    ]);

    assert_eq!(found.context().resource_count(), 2);
    assert_eq!(found.release(), 2);
    assert!(early.released() && late.released());
    assert_eq!(found.unwrap_err(), "late rejected");
}

#[test]
fn winning_provider_takes_over_earlier_resources() {
    let early = dummy();
    let early_in = early.clone();

    let found = first_val_or_last_err([
        provider(move || {
            let rejected = err::<u8>("rejected");
            rejected.context().register(early_in.handle());
            rejected
        }),
        provider(|| val(9u8)),
    ]);

    assert!(found.context().owns(&early.handle()));
    assert_eq!(found.release(), 1);
    assert_eq!(found.unwrap_val(), 9);
}

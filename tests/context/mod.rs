use std::num::ParseIntError;

use flow_rail::{
    Fault, FaultMessage, Flow, FlowContext, Handler, HandlerStack, Resource, ResourceRegistry,
};

use crate::support::{dummy, Refused, Stuck, Timeout};


#[test]
fn nearest_matching_handler_formats_the_fault() {
    let mut stack = HandlerStack::new();
    stack.push(Handler::on(|_: &Timeout| "outer".to_string()));
    stack.push(Handler::on(|_: &Timeout| "inner".to_string()));

    let fault = Fault::new(Timeout);
    assert_eq!(stack.to_message(&fault), "inner");

    stack.pop();
    assert_eq!(stack.to_message(&fault), "outer");
}

#[test]
fn non_matching_handlers_are_skipped() {
    let mut stack = HandlerStack::new();
    stack.push(Handler::on(|_: &Timeout| "timeout".to_string()));
    stack.push(Handler::on(|e: &Refused| format!("refused {}", e.0)));

    assert_eq!(stack.to_message(&Fault::new(Timeout)), "timeout");
    assert_eq!(stack.to_message(&Fault::new(Refused(5432))), "refused 5432");
}

#[test]
fn unmatched_fault_keeps_its_own_message() {
    let mut stack = HandlerStack::new();
    stack.push(Handler::on(|_: &Timeout| "timeout".to_string()));

    let fault = Fault::new(Refused(80));
    assert!(!stack.should_catch(&fault));
    assert_eq!(stack.to_message(&fault), "connection refused on port 80");
}

#[test]
fn wildcard_handler_catches_every_kind() {
    let mut stack = HandlerStack::new();
    stack.push(Handler::any());

    assert!(stack.should_catch(&Fault::new(Timeout)));
    assert!(stack.should_catch(&Fault::msg("anything")));
    assert_eq!(stack.to_message(&Fault::msg("anything")), "anything");
}

#[test]
fn typed_handler_shadows_wildcard_below_it() {
    let mut stack = HandlerStack::new();
    stack.push(Handler::any_with(|f| format!("generic: {f}")));
    stack.push(Handler::on(|e: &ParseIntError| format!("parse: {e}")));

    let parse = Fault::from("z".parse::<u8>().unwrap_err());
    assert_eq!(stack.to_message(&parse), "parse: invalid digit found in string");
    assert_eq!(stack.to_message(&Fault::new(Timeout)), "generic: timed out");
}

#[test]
fn predicate_handler_decides_matching() {
    let mut stack = HandlerStack::new();
    stack.push(Handler::when(|f| f.message().starts_with("retry")));

    assert!(stack.should_catch(&Fault::msg("retry later")));
    assert!(!stack.should_catch(&Fault::msg("give up")));
}

#[test]
fn handler_of_keeps_message_for_its_kind() {
    let handler = Handler::of::<FaultMessage>();

    assert!(handler.matches(&Fault::msg("quota exceeded")));
    assert!(!handler.matches(&Fault::new(Timeout)));
    assert_eq!(handler.format(&Fault::msg("quota exceeded")), "quota exceeded");
}

#[test]
fn iter_walks_from_top_down() {
    let mut stack = HandlerStack::new();
    stack.push(Handler::any_with(|_| "bottom".into()));
    stack.push(Handler::any_with(|_| "top".into()));

    let fault = Fault::msg("x");
    let order: Vec<String> = stack.iter().map(|h| h.format(&fault)).collect();
    assert_eq!(order, vec!["top", "bottom"]);
}

#[test]
#[should_panic(expected = "pop on an empty handler stack")]
fn pop_on_empty_stack_panics() {
    HandlerStack::new().pop();
}

#[test]
fn try_pop_on_empty_stack_returns_none() {
    let mut stack = HandlerStack::new();
    assert!(stack.try_pop().is_none());
    assert!(stack.is_empty());
}

#[test]
#[should_panic(expected = "pop on an empty handler stack")]
fn context_pop_without_handler_panics() {
    FlowContext::new().pop();
}

#[test]
fn context_handler_lifecycle() {
    let ctx = FlowContext::with_handler(Handler::any());
    assert_eq!(ctx.handler_count(), 1);

    ctx.push(Handler::on(|_: &Timeout| "slow".into()));
    assert_eq!(ctx.to_message(&Fault::new(Timeout)), "slow");

    ctx.clear_handlers();
    assert_eq!(ctx.handler_count(), 0);
    assert!(!ctx.should_catch(&Fault::new(Timeout)));
}

#[test]
fn clones_share_state() {
    let ctx = FlowContext::new();
    let alias = ctx.clone();
    alias.push(Handler::any());

    assert!(ctx.ptr_eq(&alias));
    assert_eq!(ctx.handler_count(), 1);
    assert!(!ctx.ptr_eq(&FlowContext::new()));
}

#[test]
fn registry_dedupes_by_identity() {
    let first = dummy();
    let twin = dummy();
    let mut registry = ResourceRegistry::new();

    assert!(registry.register(first.handle()));
    assert!(!registry.register(first.clone().handle()));
    assert!(registry.register(twin.handle()));
    assert_eq!(registry.len(), 2);

    assert!(registry.remove(&first.handle()));
    assert!(!registry.remove(&first.handle()));
    assert!(!registry.contains(&first.handle()));
    assert!(registry.contains(&twin.handle()));
}

#[test]
fn registry_keeps_registration_order() {
    let a = dummy();
    let b = dummy();
    let c = dummy();
    let mut registry = ResourceRegistry::new();
    for resource in [&b, &a, &c] {
        registry.register(resource.handle());
    }

    let order: Vec<_> = registry.snapshot().into_iter().collect();
    assert_eq!(order, vec![b.handle(), a.handle(), c.handle()]);
}

#[test]
fn registry_drain_empties_it() {
    let mut registry = ResourceRegistry::new();
    registry.register(dummy().handle());
    registry.register(dummy().handle());

    assert_eq!(registry.drain().len(), 2);
    assert!(registry.is_empty());
}

#[test]
fn context_owns_registered_resources() {
    let ctx = FlowContext::new();
    let resource = dummy();

    assert!(ctx.register(resource.handle()));
    assert!(ctx.owns(&resource.handle()));
    assert_eq!(ctx.resource_count(), 1);

    assert!(ctx.release_one(&resource.handle()));
    assert!(!ctx.owns(&resource.handle()));
    assert!(!resource.released());
}

#[test]
fn absorb_moves_then_clears() {
    let target = FlowContext::new();
    let source = FlowContext::new();
    let r1 = dummy();
    let r2 = dummy();
    source.register(r1.handle());
    source.register(r2.handle());
    target.register(r1.handle());

    assert_eq!(target.absorb(&source), 2);
    assert_eq!(target.resource_count(), 2);
    assert_eq!(source.resource_count(), 0);
}

#[test]
fn absorb_into_itself_is_a_no_op() {
    let ctx = FlowContext::new();
    ctx.register(dummy().handle());

    assert_eq!(ctx.absorb(&ctx.clone()), 0);
    assert_eq!(ctx.resource_count(), 1);
}

#[test]
fn formatter_may_use_its_own_context() {
    let ctx = FlowContext::new();
    let inner = ctx.clone();
    ctx.push(Handler::any_with(move |fault| {
        let depth = inner.handler_count();
        inner.push(Handler::any());
        format!("{fault}/{depth}")
    }));

    let flow = Flow::val(1u8, &ctx).map(|_| Err::<u8, _>(Fault::msg("x"))).unwrap();

    assert_eq!(flow.unwrap_err(), "x/1");
    assert_eq!(ctx.handler_count(), 2);
}

#[test]
fn predicate_may_inspect_its_own_context() {
    let ctx = FlowContext::new();
    let inner = ctx.clone();
    ctx.push(Handler::when(move |_| inner.resource_count() == 0));

    assert!(ctx.should_catch(&Fault::msg("x")));
    assert_eq!(ctx.to_message(&Fault::msg("x")), "x");
}

#[test]
fn context_release_keeps_failing_resources() {
    let ctx = FlowContext::new();
    let stuck = Resource::new(Stuck);
    let fine = dummy();
    ctx.register(stuck.handle());
    ctx.register(fine.handle());

    assert_eq!(ctx.release(), 1);
    assert!(fine.released());
    assert!(ctx.owns(&stuck.handle()));
    assert_eq!(ctx.release(), 0);
}

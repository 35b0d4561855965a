//! Action creators: naming, payload transforms, and the failed half.

use std::sync::Arc;

use anyhow::anyhow;
use typed_reducer::{
    create_action, create_action_with, is_success, ActionCreator, PayloadAction, SuccessAction,
};

#[derive(Debug, PartialEq)]
struct Increment {
    by: i64,
}

static INCREMENT: ActionCreator<i64, Increment> =
    create_action_with("increment", |by| Increment { by });

static PARSE: ActionCreator<&'static str, i32> =
    create_action_with("test action", |raw| raw.parse().expect("numeric input"));

#[test]
fn exposes_action_type() {
    assert_eq!(PARSE.action_type(), "test action");
    assert_eq!(PARSE.failed().action_type(), "test action");
}

#[test]
fn display_is_the_action_type() {
    assert_eq!(PARSE.to_string(), "test action");
    assert_eq!(PARSE.failed().to_string(), "test action");
    assert_eq!(format!("{}", INCREMENT), "increment");
}

#[test]
fn success_payload_is_transformed() {
    let action: SuccessAction<i32> = PARSE.create("100");
    assert!(is_success(&action));
    assert_eq!(*action.payload(), 100);
    assert_eq!(action.action_type(), "test action");
}

#[test]
fn increment_carries_by() {
    let action = INCREMENT.create(5);
    assert_eq!(action.action_type(), "increment");
    assert!(!action.is_error());
    assert_eq!(action.payload(), &Increment { by: 5 });
}

#[test]
fn failed_wraps_error_as_payload() {
    let error = Arc::new(anyhow!("test error"));
    let action = INCREMENT.failed().create_shared(Arc::clone(&error));

    assert!(!is_success(&action));
    assert!(action.is_error());
    assert_eq!(action.action_type(), "increment");
    assert!(Arc::ptr_eq(action.payload(), &error));
}

#[test]
fn fail_shorthand_matches_failed_creator() {
    let action = INCREMENT.fail(anyhow!("overflow"));
    assert_eq!(action.action_type(), "increment");
    assert_eq!(action.error().to_string(), "overflow");
}

#[test]
fn payloadless_creator() {
    let reset = create_action("reset");
    let action = reset.create(());
    assert_eq!(action.action_type(), "reset");
    assert_eq!(action.payload(), &());
}

/// Both halves fold into the same `PayloadAction` type.
#[test]
fn outcomes_share_payload_action_type() {
    let outcomes: Vec<PayloadAction<Increment>> = vec![
        INCREMENT.create(1).into(),
        INCREMENT.fail(anyhow!("no")).into(),
    ];
    assert!(outcomes.iter().all(|o| o.action_type() == "increment"));
    assert_eq!(outcomes.iter().filter(|o| o.is_error()).count(), 1);
}

/// Transform panics reach the caller untouched.
#[test]
#[should_panic(expected = "numeric input")]
fn transform_panic_propagates() {
    let _ = PARSE.create("not a number");
}

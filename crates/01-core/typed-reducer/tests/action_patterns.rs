//! Routing a dispatched stream the way a watcher loop would.

use anyhow::anyhow;
use typed_reducer::{
    create_action_with, Action, ActionCreator, ActionPattern, ActionType, PlainAction,
};

static FETCH: ActionCreator<u32, u32> = create_action_with("user/fetch", |id| id);
static SAVE: ActionCreator<u32, u32> = create_action_with("user/save", |id| id);

fn stream() -> Vec<Box<dyn Action>> {
    vec![
        Box::new(FETCH.create(1)),
        Box::new(SAVE.create(2)),
        Box::new(FETCH.fail(anyhow!("timeout"))),
        Box::new(PlainAction::new("user/fetch")),
        Box::new(FETCH.create(3)),
    ]
}

#[test]
fn success_pattern_selects_typed_successes() {
    let pattern = FETCH.success_pattern();
    let ids: Vec<u32> = stream()
        .iter()
        .filter_map(|action| pattern.select(action.as_ref()))
        .map(|action| *action.payload())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn failure_pattern_selects_failures() {
    let pattern = FETCH.failure_pattern();
    let errors: Vec<String> = stream()
        .iter()
        .filter_map(|action| pattern.select(action.as_ref()))
        .map(|action| action.error().to_string())
        .collect();
    assert_eq!(errors, vec!["timeout".to_owned()]);
    assert_eq!(pattern, FETCH.failed().pattern());
}

/// Untagged actions share the name but match neither outcome pattern.
#[test]
fn plain_action_only_matches_type_pattern() {
    let plain = PlainAction::new("user/fetch");
    assert!(ActionType::from_static("user/fetch").matches(&plain));
    assert!(!FETCH.success_pattern().matches(&plain));
    assert!(!FETCH.failure_pattern().matches(&plain));
}

#[test]
fn patterns_reject_other_types() {
    let save = SAVE.create(9);
    assert!(!FETCH.success_pattern().matches(&save));
    assert!(SAVE.success_pattern().matches(&save));
}

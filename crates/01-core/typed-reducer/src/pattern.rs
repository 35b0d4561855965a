//! Matchers for picking actions out of a dispatched stream.
//!
//! Effect runtimes (watchers, sagas, subscription loops) route work on
//! `type == creator's type && is_success/is_failure`. These patterns package
//! that check so a watcher can `match` on the result instead of probing
//! shapes.

use std::any::Any;
use std::marker::PhantomData;

use crate::action::{
    as_failure, as_success, is_failure, is_success, Action, ActionType, FailedAction,
    SuccessAction,
};
use crate::creator::{ActionCreator, FailedActionCreator};

pub trait ActionPattern {
    fn matches(&self, action: &dyn Action) -> bool;
}

/// Matches on the type name alone, tagged or not.
impl ActionPattern for ActionType {
    fn matches(&self, action: &dyn Action) -> bool {
        action.action_type() == self.as_str()
    }
}

/// Successes of one action type.
pub struct SuccessPattern<P> {
    action_type: ActionType,
    payload: PhantomData<fn() -> P>,
}

impl<P: Any> SuccessPattern<P> {
    pub fn new(action_type: impl Into<ActionType>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: PhantomData,
        }
    }

    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Typed view of `action` when it matches and its payload is a `P`.
    pub fn select<'a>(&self, action: &'a dyn Action) -> Option<&'a SuccessAction<P>> {
        if action.action_type() != self.action_type.as_str() {
            return None;
        }
        as_success::<P>(action)
    }
}

impl<P> Clone for SuccessPattern<P> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            payload: PhantomData,
        }
    }
}

impl<P> std::fmt::Debug for SuccessPattern<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SuccessPattern")
            .field(&self.action_type)
            .finish()
    }
}

impl<P: Any> ActionPattern for SuccessPattern<P> {
    fn matches(&self, action: &dyn Action) -> bool {
        action.action_type() == self.action_type.as_str() && is_success(action)
    }
}

/// Failures of one action type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailurePattern {
    action_type: ActionType,
}

impl FailurePattern {
    pub fn new(action_type: impl Into<ActionType>) -> Self {
        Self {
            action_type: action_type.into(),
        }
    }

    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    pub fn select<'a>(&self, action: &'a dyn Action) -> Option<&'a FailedAction> {
        if action.action_type() != self.action_type.as_str() {
            return None;
        }
        as_failure(action)
    }
}

impl ActionPattern for FailurePattern {
    fn matches(&self, action: &dyn Action) -> bool {
        action.action_type() == self.action_type.as_str() && is_failure(action)
    }
}

impl<A, P: Any> ActionCreator<A, P> {
    pub fn success_pattern(&self) -> SuccessPattern<P> {
        SuccessPattern::new(self.action_type().clone())
    }

    pub fn failure_pattern(&self) -> FailurePattern {
        self.failed().pattern()
    }
}

impl FailedActionCreator {
    pub fn pattern(&self) -> FailurePattern {
        FailurePattern::new(self.action_type().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{create_success, PlainAction};

    #[test]
    fn type_pattern_ignores_tagging() {
        let pattern = ActionType::from_static("tick");
        assert!(pattern.matches(&PlainAction::new("tick")));
        assert!(pattern.matches(&create_success("tick", ())));
        assert!(!pattern.matches(&PlainAction::new("tock")));
    }

    #[test]
    fn success_pattern_matches_untyped_payloads_but_selects_typed() {
        let pattern = SuccessPattern::<u8>::new("tick");
        let foreign = create_success("tick", "str payload");
        assert!(pattern.matches(&foreign));
        assert!(pattern.select(&foreign).is_none());
        assert_eq!(
            pattern.select(&create_success("tick", 3u8)).map(|a| *a.payload()),
            Some(3)
        );
    }
}

//! Self-describing action constructors.

use std::fmt;

use crate::action::{
    create_failure, create_shared_failure, create_success, ActionType, FailedAction, SharedError,
    SuccessAction,
};

fn no_payload(_: ()) {}

/// Constructor for one named operation.
///
/// Calling [`ActionCreator::create`] yields the success action and
/// [`ActionCreator::failed`] exposes the constructor for the failure; both
/// report the same [`ActionType`].
pub struct ActionCreator<A, P> {
    action_type: ActionType,
    transform: fn(A) -> P,
    failed: FailedActionCreator,
}

/// Creator for an operation without a payload. Usable in `static` items.
pub const fn create_action(action_type: &'static str) -> ActionCreator<(), ()> {
    create_action_with(action_type, no_payload)
}

/// Creator whose success payload is `transform(arg)`. Usable in `static` items.
pub const fn create_action_with<A, P>(
    action_type: &'static str,
    transform: fn(A) -> P,
) -> ActionCreator<A, P> {
    ActionCreator {
        action_type: ActionType::from_static(action_type),
        transform,
        failed: FailedActionCreator {
            action_type: ActionType::from_static(action_type),
        },
    }
}

impl<A, P> ActionCreator<A, P> {
    /// Creator for a type name only known at runtime.
    pub fn new(action_type: impl Into<ActionType>, transform: fn(A) -> P) -> Self {
        let action_type = action_type.into();
        Self {
            failed: FailedActionCreator {
                action_type: action_type.clone(),
            },
            action_type,
            transform,
        }
    }

    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Builds the success action. A panicking transform unwinds to the caller.
    pub fn create(&self, arg: A) -> SuccessAction<P> {
        create_success(self.action_type.clone(), (self.transform)(arg))
    }

    pub fn failed(&self) -> &FailedActionCreator {
        &self.failed
    }

    /// Shorthand for `self.failed().create(error)`.
    pub fn fail(&self, error: impl Into<anyhow::Error>) -> FailedAction {
        self.failed.create(error)
    }
}

impl<A, P> Clone for ActionCreator<A, P> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            transform: self.transform,
            failed: self.failed.clone(),
        }
    }
}

impl<A, P> fmt::Debug for ActionCreator<A, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("action_type", &self.action_type)
            .finish_non_exhaustive()
    }
}

impl<A, P> fmt::Display for ActionCreator<A, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.action_type, f)
    }
}

/// Failure half of an [`ActionCreator`], sharing its type name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedActionCreator {
    action_type: ActionType,
}

impl FailedActionCreator {
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    pub fn create(&self, error: impl Into<anyhow::Error>) -> FailedAction {
        create_failure(self.action_type.clone(), error)
    }

    /// Like [`FailedActionCreator::create`] for an error the caller keeps.
    pub fn create_shared(&self, error: SharedError) -> FailedAction {
        create_shared_failure(self.action_type.clone(), error)
    }
}

impl fmt::Display for FailedActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.action_type, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{is_failure, is_success};

    static PARSE: ActionCreator<&'static str, Option<i32>> =
        create_action_with("parse", |raw| raw.parse().ok());

    #[test]
    fn static_creator_applies_transform() {
        let action = PARSE.create("100");
        assert!(is_success(&action));
        assert_eq!(action.payload(), &Some(100));
        assert_eq!(action.action_type(), "parse");
    }

    #[test]
    fn runtime_named_creator_shares_name_with_failed_half() {
        let creator = ActionCreator::new(format!("user/{}", "load"), |id: u64| id * 2);
        assert_eq!(creator.action_type(), "user/load");
        assert_eq!(creator.failed().action_type(), "user/load");
        assert_eq!(*creator.create(21).payload(), 42);

        let failed = creator.fail(anyhow::anyhow!("nope"));
        assert!(is_failure(&failed));
        assert_eq!(failed.action_type(), "user/load");
    }

    #[test]
    fn payloadless_creator_yields_unit_payload() {
        let ping = create_action("ping");
        let action = ping.create(());
        assert_eq!(action.payload(), &());
        assert_eq!(ping.to_string(), "ping");
    }
}

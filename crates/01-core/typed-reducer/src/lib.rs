//! Typed success/failure actions and reducer builders.
//!
//! The crate layers three pieces over an external dispatch loop:
//! tagged actions that say whether an operation succeeded, action creators
//! that mint them under one type name, and reducer builders that route each
//! dispatched action to the state-update function registered for its type.
//!
//! ```
//! use std::sync::Arc;
//! use typed_reducer::{create_action_with, create_reducer, ActionCreator};
//!
//! struct Increment {
//!     by: i64,
//! }
//!
//! static INCREMENT: ActionCreator<i64, Increment> =
//!     create_action_with("increment", |by| Increment { by });
//!
//! let reducer = create_reducer(10i64)
//!     .handle_action(&INCREMENT, |state, action| Arc::new(*state + action.payload().by))
//!     .expect("single registration");
//!
//! let next = reducer.reduce(None, &INCREMENT.create(5));
//! assert_eq!(*next, 15);
//! ```

/// Tagged actions, the `Action` trait, and discriminator predicates.
pub mod action;
/// Action creators bound to one type name.
pub mod creator;
mod error;
/// Matchers used by effect runtimes to filter dispatched actions.
pub mod pattern;
mod property;
/// Reducer builder and the `Reduce` contract.
pub mod reducer;

pub use crate::action::{
    as_failure, as_success, assume_success, create_failure, create_shared_failure,
    create_success, is_failure, is_success, is_tagged_action, Action, ActionType, FailedAction,
    Outcome, PayloadAction, PlainAction, SharedError, SuccessAction, Tag,
};
pub use crate::creator::{create_action, create_action_with, ActionCreator, FailedActionCreator};
pub use crate::error::{ReducerError, ReducerResult};
pub use crate::pattern::{ActionPattern, FailurePattern, SuccessPattern};
pub use crate::property::Property;
pub use crate::reducer::{create_reducer, reduce_fn, Reduce, Reducer, ReducerBuilder};

//! Reducer builder: routes dispatched actions to state-update functions.

use std::any::{type_name, Any};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};
use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::action::{
    as_failure, as_success, Action, ActionType, FailedAction, Outcome, SuccessAction, Tag,
};
use crate::creator::ActionCreator;
use crate::error::{ReducerError, ReducerResult};
use crate::property::Property;

type Handler<S> = Arc<dyn Fn(Arc<S>, &dyn Action) -> Arc<S> + Send + Sync>;
type FailureHandler<S> = Box<dyn Fn(Arc<S>, &FailedAction) -> Arc<S> + Send + Sync>;

/// A `(state, action) -> next state` function.
///
/// `None` stands for "no state yet"; implementations substitute their
/// initial state.
pub trait Reduce<S>: Send + Sync {
    fn reduce(&self, state: Option<Arc<S>>, action: &dyn Action) -> Arc<S>;
}

impl<S, F> Reduce<S> for F
where
    F: Fn(Option<Arc<S>>, &dyn Action) -> Arc<S> + Send + Sync,
{
    fn reduce(&self, state: Option<Arc<S>>, action: &dyn Action) -> Arc<S> {
        self(state, action)
    }
}

/// Pins a closure to the [`Reduce`] signature so its argument types need no
/// annotations.
pub fn reduce_fn<S, F>(reducer: F) -> F
where
    F: Fn(Option<Arc<S>>, &dyn Action) -> Arc<S> + Send + Sync,
{
    reducer
}

struct Registry<S> {
    handlers: HashMap<ActionType, Handler<S>>,
    /// Run on every action, in registration order, after the handler lookup.
    post: SmallVec<[Handler<S>; 4]>,
}

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            post: SmallVec::new(),
        }
    }
}

/// Callable half of a [`ReducerBuilder`].
///
/// Shares the builder's registration table, so handlers registered after the
/// `Reducer` was handed out still apply. A dispatch works on a snapshot of
/// the table taken when it starts and holds no lock while user code runs.
pub struct Reducer<S> {
    initial_state: Arc<S>,
    registry: Arc<RwLock<Registry<S>>>,
}

impl<S> Clone for Reducer<S> {
    fn clone(&self) -> Self {
        Self {
            initial_state: Arc::clone(&self.initial_state),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S: Send + Sync + 'static> Reducer<S> {
    pub fn initial_state(&self) -> &Arc<S> {
        &self.initial_state
    }

    /// Whether a handler is registered for `action_type`.
    pub fn handles(&self, action_type: &str) -> bool {
        self.registry.read().handlers.contains_key(action_type)
    }

    pub fn reduce(&self, state: Option<Arc<S>>, action: &dyn Action) -> Arc<S> {
        let state = state.unwrap_or_else(|| Arc::clone(&self.initial_state));
        let (handler, post) = {
            let registry = self.registry.read();
            (
                registry.handlers.get(action.action_type()).cloned(),
                registry.post.clone(),
            )
        };

        let state = match handler {
            Some(handler) => handler(state, action),
            None => {
                trace!(
                    "reducer<{}>: no handler for '{}'",
                    type_name::<S>(),
                    action.action_type()
                );
                state
            }
        };

        post.iter().fold(state, |state, step| step(state, action))
    }
}

impl<S: Send + Sync + 'static> Reduce<S> for Reducer<S> {
    fn reduce(&self, state: Option<Arc<S>>, action: &dyn Action) -> Arc<S> {
        Reducer::reduce(self, state, action)
    }
}

impl<S> fmt::Debug for Reducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.read();
        let mut handled: Vec<&str> = registry
            .handlers
            .keys()
            .map(ActionType::as_str)
            .collect();
        handled.sort_unstable();
        f.debug_struct("Reducer")
            .field("state", &type_name::<S>())
            .field("handled", &handled)
            .field("post_reducers", &registry.post.len())
            .finish()
    }
}

/// Accumulates action handlers for a state `S`.
///
/// Each action type can be registered once per builder. The builder is itself
/// a [`Reduce`] implementation; [`ReducerBuilder::reducer`] hands out
/// cloneable handles sharing the same table.
pub struct ReducerBuilder<S> {
    reducer: Reducer<S>,
}

/// Starts a builder whose reducer yields `initial_state` when given no state.
pub fn create_reducer<S: Send + Sync + 'static>(initial_state: S) -> ReducerBuilder<S> {
    ReducerBuilder::new(initial_state)
}

impl<S: Send + Sync + 'static> ReducerBuilder<S> {
    pub fn new(initial_state: S) -> Self {
        Self::from_shared(Arc::new(initial_state))
    }

    /// Builder whose initial state is exactly `initial_state` (same `Arc`).
    pub fn from_shared(initial_state: Arc<S>) -> Self {
        Self {
            reducer: Reducer {
                initial_state,
                registry: Arc::new(RwLock::new(Registry::default())),
            },
        }
    }

    /// Registers `reducer` for actions named `action_type`, tagged or not.
    pub fn handle_untyped_action<F>(
        self,
        action_type: impl Into<ActionType>,
        reducer: F,
    ) -> ReducerResult<Self>
    where
        F: Fn(Arc<S>, &dyn Action) -> Arc<S> + Send + Sync + 'static,
    {
        let action_type = action_type.into();
        {
            let mut registry = self.reducer.registry.write();
            match registry.handlers.entry(action_type) {
                Entry::Occupied(entry) => {
                    return Err(ReducerError::DuplicateHandler(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    debug!(
                        "reducer<{}>: handling '{}'",
                        type_name::<S>(),
                        entry.key()
                    );
                    entry.insert(Arc::new(reducer));
                }
            }
        }
        Ok(self)
    }

    /// Runs `on_success` for successes of `creator`. Failures leave the
    /// state untouched.
    pub fn handle_action<A, P, F>(
        self,
        creator: &ActionCreator<A, P>,
        on_success: F,
    ) -> ReducerResult<Self>
    where
        P: Any,
        F: Fn(Arc<S>, &SuccessAction<P>) -> Arc<S> + Send + Sync + 'static,
    {
        self.handle_split::<P, F>(creator.action_type(), on_success, None)
    }

    /// Runs `on_success` for successes and `on_failure` for failures of
    /// `creator`.
    pub fn handle_action_with_failure<A, P, F, G>(
        self,
        creator: &ActionCreator<A, P>,
        on_success: F,
        on_failure: G,
    ) -> ReducerResult<Self>
    where
        P: Any,
        F: Fn(Arc<S>, &SuccessAction<P>) -> Arc<S> + Send + Sync + 'static,
        G: Fn(Arc<S>, &FailedAction) -> Arc<S> + Send + Sync + 'static,
    {
        self.handle_split::<P, F>(
            creator.action_type(),
            on_success,
            Some(Box::new(on_failure)),
        )
    }

    fn handle_split<P, F>(
        self,
        action_type: &ActionType,
        on_success: F,
        on_failure: Option<FailureHandler<S>>,
    ) -> ReducerResult<Self>
    where
        P: Any,
        F: Fn(Arc<S>, &SuccessAction<P>) -> Arc<S> + Send + Sync + 'static,
    {
        let split = move |state: Arc<S>, action: &dyn Action| -> Arc<S> {
            match action.tag().map(Tag::outcome) {
                Some(Outcome::Success) => match as_success::<P>(action) {
                    Some(success) => on_success(state, success),
                    None => {
                        warn!(
                            "reducer<{}>: '{}' carries a payload other than {}, ignoring",
                            type_name::<S>(),
                            action.action_type(),
                            type_name::<P>()
                        );
                        state
                    }
                },
                Some(Outcome::Failure) => match (&on_failure, as_failure(action)) {
                    (Some(on_failure), Some(failed)) => on_failure(state, failed),
                    _ => state,
                },
                None => {
                    trace!(
                        "reducer<{}>: untagged '{}' ignored by typed handler",
                        type_name::<S>(),
                        action.action_type()
                    );
                    state
                }
            }
        };

        self.handle_untyped_action(action_type.clone(), split)
    }

    /// Feeds every action to `reducer` for the `property` slice.
    ///
    /// The outer state keeps its identity unless the slice comes back as a
    /// different `Arc`, in which case a shallow copy with only that field
    /// replaced is produced. Steps run in registration order after the
    /// handler lookup.
    pub fn for_property<T, R>(self, property: Property<S, T>, reducer: R) -> Self
    where
        S: Clone,
        T: Send + Sync + 'static,
        R: Reduce<T> + 'static,
    {
        debug!(
            "reducer<{}>: delegating property '{}'",
            type_name::<S>(),
            property.name()
        );

        let step = move |state: Arc<S>, action: &dyn Action| -> Arc<S> {
            let input = property.get(&state);
            let output = reducer.reduce(Some(Arc::clone(input)), action);
            if Arc::ptr_eq(input, &output) {
                return state;
            }

            let mut next = (*state).clone();
            property.set(&mut next, output);
            Arc::new(next)
        };

        self.reducer.registry.write().post.push(Arc::new(step));
        self
    }

    pub fn initial_state(&self) -> &Arc<S> {
        self.reducer.initial_state()
    }

    /// Handle onto the live table; see [`Reducer`].
    pub fn reducer(&self) -> Reducer<S> {
        self.reducer.clone()
    }

    pub fn reduce(&self, state: Option<Arc<S>>, action: &dyn Action) -> Arc<S> {
        self.reducer.reduce(state, action)
    }
}

impl<S: Send + Sync + 'static> Reduce<S> for ReducerBuilder<S> {
    fn reduce(&self, state: Option<Arc<S>>, action: &dyn Action) -> Arc<S> {
        self.reducer.reduce(state, action)
    }
}

impl<S> fmt::Debug for ReducerBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerBuilder")
            .field("reducer", &self.reducer)
            .finish()
    }
}

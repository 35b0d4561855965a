use thiserror::Error;

use crate::action::ActionType;

pub type ReducerResult<T> = Result<T, ReducerError>;

#[derive(Debug, Error)]
pub enum ReducerError {
    #[error("already handling an action with name '{0}'")]
    DuplicateHandler(ActionType),

    #[error("assumed '{0}' action was successful when it was not")]
    AssumedSuccess(ActionType),
}

impl ReducerError {
    /// Action type the error was raised for.
    pub fn action_type(&self) -> &ActionType {
        match self {
            ReducerError::DuplicateHandler(action_type)
            | ReducerError::AssumedSuccess(action_type) => action_type,
        }
    }
}

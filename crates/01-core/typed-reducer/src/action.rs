//! Tagged success/failure actions and the predicates that recognise them.
//!
//! Every value flowing through a reducer implements [`Action`]. Only the
//! factories in this module can mint a [`Tag`], so the discriminator
//! predicates ([`is_success`], [`is_failure`]) cannot be fooled by a
//! hand-built value that merely looks like a success or a failure.

use std::any::Any;
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

use crate::error::{ReducerError, ReducerResult};

/// Error carried as the payload of a failed action.
pub type SharedError = Arc<anyhow::Error>;

/// Name identifying one logical operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ActionType(Cow<'static, str>);

impl ActionType {
    /// Creates an action type usable in `const` and `static` items.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ActionType {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl Borrow<str> for ActionType {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ActionType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ActionType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a tagged action reports a success or a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

/// Proof of origin attached to actions built by [`create_success`] and
/// [`create_failure`].
///
/// `Tag` has no public constructor and is not `Clone`: an [`Action`] impl can
/// only hand one out by borrowing it from a genuine tagged action, in which
/// case it also carries that action's real outcome.
#[derive(Debug, PartialEq, Eq)]
pub struct Tag {
    outcome: Outcome,
}

impl Tag {
    const fn new(outcome: Outcome) -> Self {
        Self { outcome }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_error(&self) -> bool {
        self.outcome == Outcome::Failure
    }
}

/// Upcast helper so `&dyn Action` can be downcast to a concrete action.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Anything that can be dispatched into a reducer.
pub trait Action: AsAny {
    /// Name the reducer routes on.
    fn action_type(&self) -> &str;

    /// Origin tag. Untagged (plain) actions return `None`.
    fn tag(&self) -> Option<&Tag> {
        None
    }

    /// Failed view of this action, if it is one.
    fn as_failed(&self) -> Option<&FailedAction> {
        None
    }
}

/// Untagged action that only carries a type name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlainAction {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    action_type: ActionType,
}

impl PlainAction {
    pub fn new(action_type: impl Into<ActionType>) -> Self {
        Self {
            action_type: action_type.into(),
        }
    }

    pub fn action_type(&self) -> &str {
        self.action_type.as_str()
    }
}

impl Action for PlainAction {
    fn action_type(&self) -> &str {
        self.action_type.as_str()
    }
}

/// Successful outcome of an operation, carrying its payload.
#[derive(Debug)]
pub struct SuccessAction<P> {
    action_type: ActionType,
    payload: P,
    tag: Tag,
}

impl<P> SuccessAction<P> {
    pub fn action_type(&self) -> &str {
        self.action_type.as_str()
    }

    pub fn kind(&self) -> &ActionType {
        &self.action_type
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Always `false`.
    pub fn is_error(&self) -> bool {
        self.tag.is_error()
    }
}

impl<P: Clone> Clone for SuccessAction<P> {
    fn clone(&self) -> Self {
        create_success(self.action_type.clone(), self.payload.clone())
    }
}

impl<P: PartialEq> PartialEq for SuccessAction<P> {
    fn eq(&self, other: &Self) -> bool {
        self.action_type == other.action_type && self.payload == other.payload
    }
}

impl<P: Any> Action for SuccessAction<P> {
    fn action_type(&self) -> &str {
        self.action_type.as_str()
    }

    fn tag(&self) -> Option<&Tag> {
        Some(&self.tag)
    }
}

/// Failed outcome of an operation; the payload is the error.
#[derive(Debug)]
pub struct FailedAction {
    action_type: ActionType,
    error: SharedError,
    tag: Tag,
}

impl FailedAction {
    pub fn action_type(&self) -> &str {
        self.action_type.as_str()
    }

    pub fn kind(&self) -> &ActionType {
        &self.action_type
    }

    pub fn error(&self) -> &SharedError {
        &self.error
    }

    /// Same as [`FailedAction::error`]; failures carry the error as payload.
    pub fn payload(&self) -> &SharedError {
        &self.error
    }

    /// Always `true`.
    pub fn is_error(&self) -> bool {
        self.tag.is_error()
    }
}

impl Clone for FailedAction {
    fn clone(&self) -> Self {
        create_shared_failure(self.action_type.clone(), Arc::clone(&self.error))
    }
}

impl PartialEq for FailedAction {
    fn eq(&self, other: &Self) -> bool {
        self.action_type == other.action_type && Arc::ptr_eq(&self.error, &other.error)
    }
}

impl Action for FailedAction {
    fn action_type(&self) -> &str {
        self.action_type.as_str()
    }

    fn tag(&self) -> Option<&Tag> {
        Some(&self.tag)
    }

    fn as_failed(&self) -> Option<&FailedAction> {
        Some(self)
    }
}

/// Either outcome of one operation.
#[derive(Clone, Debug, PartialEq)]
pub enum PayloadAction<P> {
    Success(SuccessAction<P>),
    Failed(FailedAction),
}

impl<P> PayloadAction<P> {
    pub fn action_type(&self) -> &str {
        match self {
            PayloadAction::Success(action) => action.action_type(),
            PayloadAction::Failed(action) => action.action_type(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PayloadAction::Failed(_))
    }

    pub fn as_success(&self) -> Option<&SuccessAction<P>> {
        match self {
            PayloadAction::Success(action) => Some(action),
            PayloadAction::Failed(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&FailedAction> {
        match self {
            PayloadAction::Success(_) => None,
            PayloadAction::Failed(action) => Some(action),
        }
    }

    /// By-value form of [`assume_success`].
    pub fn into_success(self) -> ReducerResult<SuccessAction<P>> {
        match self {
            PayloadAction::Success(action) => Ok(action),
            PayloadAction::Failed(action) => {
                Err(ReducerError::AssumedSuccess(action.action_type))
            }
        }
    }

    pub fn into_result(self) -> Result<SuccessAction<P>, FailedAction> {
        match self {
            PayloadAction::Success(action) => Ok(action),
            PayloadAction::Failed(action) => Err(action),
        }
    }
}

impl<P> From<SuccessAction<P>> for PayloadAction<P> {
    fn from(action: SuccessAction<P>) -> Self {
        PayloadAction::Success(action)
    }
}

impl<P> From<FailedAction> for PayloadAction<P> {
    fn from(action: FailedAction) -> Self {
        PayloadAction::Failed(action)
    }
}

impl<P: Any> Action for PayloadAction<P> {
    fn action_type(&self) -> &str {
        PayloadAction::action_type(self)
    }

    fn tag(&self) -> Option<&Tag> {
        match self {
            PayloadAction::Success(action) => Some(&action.tag),
            PayloadAction::Failed(action) => Some(&action.tag),
        }
    }

    fn as_failed(&self) -> Option<&FailedAction> {
        self.as_failure()
    }
}

pub fn create_success<P>(action_type: impl Into<ActionType>, payload: P) -> SuccessAction<P> {
    SuccessAction {
        action_type: action_type.into(),
        payload,
        tag: Tag::new(Outcome::Success),
    }
}

pub fn create_failure(
    action_type: impl Into<ActionType>,
    error: impl Into<anyhow::Error>,
) -> FailedAction {
    create_shared_failure(action_type, Arc::new(error.into()))
}

/// Builds a failure around an error the caller keeps a handle to.
pub fn create_shared_failure(
    action_type: impl Into<ActionType>,
    error: SharedError,
) -> FailedAction {
    FailedAction {
        action_type: action_type.into(),
        error,
        tag: Tag::new(Outcome::Failure),
    }
}

/// True iff `candidate` was built by this module's factories.
pub fn is_tagged_action(candidate: &dyn Action) -> bool {
    candidate.tag().is_some()
}

pub fn is_success(candidate: &dyn Action) -> bool {
    candidate.tag().map(Tag::outcome) == Some(Outcome::Success)
}

pub fn is_failure(candidate: &dyn Action) -> bool {
    candidate.tag().map(Tag::outcome) == Some(Outcome::Failure)
}

/// Returns the success half of `candidate`, or an error naming its type when
/// control flow was wrong about it having succeeded.
pub fn assume_success<P>(candidate: &PayloadAction<P>) -> ReducerResult<&SuccessAction<P>> {
    match candidate {
        PayloadAction::Success(action) => Ok(action),
        PayloadAction::Failed(action) => {
            Err(ReducerError::AssumedSuccess(action.action_type.clone()))
        }
    }
}

/// Typed success view of a dispatched action.
///
/// Returns `None` for failures, untagged actions, and successes whose payload
/// is not a `P`.
pub fn as_success<P: Any>(action: &dyn Action) -> Option<&SuccessAction<P>> {
    if !is_success(action) {
        return None;
    }
    let any = action.as_any();
    any.downcast_ref::<SuccessAction<P>>().or_else(|| {
        any.downcast_ref::<PayloadAction<P>>()
            .and_then(PayloadAction::as_success)
    })
}

/// Failure view of a dispatched action, whatever its success payload type.
pub fn as_failure(action: &dyn Action) -> Option<&FailedAction> {
    if !is_failure(action) {
        return None;
    }
    action.as_failed()
}

#[cfg(feature = "serde")]
impl<P: Serialize> Serialize for SuccessAction<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SuccessAction", 3)?;
        state.serialize_field("type", &self.action_type)?;
        state.serialize_field("error", &false)?;
        state.serialize_field("payload", &self.payload)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl Serialize for FailedAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FailedAction", 3)?;
        state.serialize_field("type", &self.action_type)?;
        state.serialize_field("error", &true)?;
        state.serialize_field("payload", &self.error.to_string())?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<P: Serialize> Serialize for PayloadAction<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PayloadAction::Success(action) => action.serialize(serializer),
            PayloadAction::Failed(action) => action.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_tag_reports_success() {
        let action = create_success("load", 3u8);
        assert_eq!(action.tag.outcome(), Outcome::Success);
        assert!(!action.is_error());
        assert_eq!(action.kind(), &ActionType::from_static("load"));
    }

    #[test]
    fn failure_tag_reports_failure() {
        let action = create_failure("load", anyhow::anyhow!("disk gone"));
        assert_eq!(action.tag.outcome(), Outcome::Failure);
        assert!(action.is_error());
        assert_eq!(action.error().to_string(), "disk gone");
    }

    #[test]
    fn clone_mints_a_fresh_tag_with_same_outcome() {
        let failed = create_failure("load", anyhow::anyhow!("x"));
        let copy = failed.clone();
        assert_eq!(copy, failed);
        assert!(is_failure(&copy));
    }

    #[test]
    fn as_success_reads_through_payload_action() {
        let action: PayloadAction<u32> = create_success("n", 7u32).into();
        let view = as_success::<u32>(&action).expect("success view");
        assert_eq!(*view.payload(), 7);
        assert!(as_success::<i64>(&action).is_none());
        assert!(as_failure(&action).is_none());
    }

    #[test]
    fn action_type_compares_against_str() {
        let owned = ActionType::from(String::from("fetch"));
        assert_eq!(owned, "fetch");
        assert_eq!(owned, ActionType::from_static("fetch"));
        assert_eq!(owned.to_string(), "fetch");
    }
}

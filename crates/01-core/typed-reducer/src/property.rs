//! Named accessors for the `Arc`-held slices of a state struct.

use std::fmt;
use std::sync::Arc;

/// One `Arc<T>` field of a state `S`, addressed by name.
///
/// Usually built with [`property!`](crate::property).
pub struct Property<S, T> {
    name: &'static str,
    get: fn(&S) -> &Arc<T>,
    set: fn(&mut S, Arc<T>),
}

impl<S, T> Property<S, T> {
    pub const fn new(
        name: &'static str,
        get: fn(&S) -> &Arc<T>,
        set: fn(&mut S, Arc<T>),
    ) -> Self {
        Self { name, get, set }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<'a>(&self, state: &'a S) -> &'a Arc<T> {
        (self.get)(state)
    }

    pub fn set(&self, state: &mut S, value: Arc<T>) {
        (self.set)(state, value)
    }
}

impl<S, T> Clone for Property<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Property<S, T> {}

impl<S, T> fmt::Debug for Property<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.name).finish()
    }
}

/// Builds a [`Property`] for `field` of `State`, which must be an `Arc<_>`.
///
/// ```
/// use std::sync::Arc;
/// use typed_reducer::property;
///
/// #[derive(Clone)]
/// struct Session {
///     user: Arc<String>,
/// }
///
/// let user = property!(Session, user);
/// assert_eq!(user.name(), "user");
/// ```
#[macro_export]
macro_rules! property {
    ($state:ty, $field:ident) => {
        $crate::Property::<$state, _>::new(
            ::core::stringify!($field),
            |state: &$state| &state.$field,
            |state: &mut $state, value| state.$field = value,
        )
    };
}

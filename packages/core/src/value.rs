//! The value contract: what a type provides to live in an environment.

use crate::slot::Slot;

/// A type that can be stored in an [`Environment`](crate::Environment) and
/// injected into a [`Scope`](crate::Scope).
///
/// Implementing this trait is the whole registration step. There is no
/// global table of environment values: the storage slot is derived from the
/// implementing type itself, so crates that know nothing about each other can
/// each introduce their own values.
///
/// `default_value` must be pure. It is called every time a lookup falls
/// through to the default, possibly many times and from several threads.
///
/// # Example
///
/// ```rust
/// use ambient_core::{EnvironmentValue, Scope};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Indent(usize);
///
/// impl EnvironmentValue for Indent {
///     fn default_value() -> Self {
///         Indent(4)
///     }
/// }
///
/// let root = Scope::root();
/// assert_eq!(root.get::<Indent>(), Indent(4));
///
/// let nested = root.inject(Indent(2));
/// assert_eq!(nested.get::<Indent>(), Indent(2));
/// ```
pub trait EnvironmentValue: Clone + Send + Sync + 'static {
    /// The value returned when no scope in the chain overrides this type.
    fn default_value() -> Self;

    /// The slot this type is stored under.
    fn slot() -> Slot<Self> {
        Slot::new()
    }
}

/// Implement [`EnvironmentValue`] for a type in one line.
///
/// With a single type argument the type's `Default` impl supplies the
/// default value. An explicit default expression can follow `=>`.
///
/// ```rust
/// use ambient_core::{environment_value, Scope};
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Verbose(bool);
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Width(u16);
///
/// environment_value!(Verbose);
/// environment_value!(Width => Width(80));
///
/// let scope = Scope::root();
/// assert_eq!(scope.get::<Verbose>(), Verbose(false));
/// assert_eq!(scope.get::<Width>(), Width(80));
/// ```
#[macro_export]
macro_rules! environment_value {
    ($ty:ty => $default:expr) => {
        impl $crate::EnvironmentValue for $ty {
            fn default_value() -> Self {
                $default
            }
        }
    };
    ($ty:ty) => {
        $crate::environment_value!($ty => <$ty as ::core::default::Default>::default());
    };
}

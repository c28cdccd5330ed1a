//! The read seam shared by environments and scopes.

use crate::EnvironmentValue;

/// Something environment values can be resolved from.
///
/// Implemented by [`Environment`](crate::Environment) (its own entries only)
/// and [`Scope`](crate::Scope) (the whole override chain). Hierarchy code that
/// only needs to read can be generic over this trait.
///
/// Only [`lookup`](ValueSource::lookup) is required. Every other method falls
/// back to [`EnvironmentValue::default_value`] when nothing is bound, so reads
/// through this trait never fail.
///
/// The methods are generic, so the trait is not object-safe. Pass
/// `&impl ValueSource` instead of `&dyn ValueSource`.
pub trait ValueSource {
    /// Borrow the bound value of `T`, without falling back to the default.
    fn lookup<T: EnvironmentValue>(&self) -> Option<&T>;

    /// The effective value of `T`: the bound value, else the default.
    fn get<T: EnvironmentValue>(&self) -> T {
        self.lookup::<T>().cloned().unwrap_or_else(T::default_value)
    }

    /// Read the effective value of `T` by reference.
    ///
    /// Avoids cloning a bound value. The default is built only if needed.
    fn with<T: EnvironmentValue, R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.lookup::<T>() {
            Some(value) => f(value),
            None => f(&T::default_value()),
        }
    }

    /// True if some value is bound for `T`.
    fn is_overridden<T: EnvironmentValue>(&self) -> bool {
        self.lookup::<T>().is_some()
    }
}

impl<S: ValueSource + ?Sized> ValueSource for &S {
    fn lookup<T: EnvironmentValue>(&self) -> Option<&T> {
        (**self).lookup::<T>()
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn lookup<T: EnvironmentValue>(&self) -> Option<&T> {
        (**self).lookup::<T>()
    }
}

impl<S: ValueSource + ?Sized> ValueSource for std::sync::Arc<S> {
    fn lookup<T: EnvironmentValue>(&self) -> Option<&T> {
        (**self).lookup::<T>()
    }
}

//! Environment: the persistent, type-indexed value container.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::slot::SlotId;
use crate::traits::ValueSource;
use crate::EnvironmentValue;

/// A boxed, shareable environment value.
type Entry = Arc<dyn Any + Send + Sync>;

/// A set of environment values, at most one per value type.
///
/// Environments are persistent: [`set`](Environment::set) returns a new
/// environment and leaves the receiver untouched. Values are shared between
/// versions, only the slot table is copied. Cloning is a reference count bump.
///
/// Entries can only be inserted through `set::<T>`, which derives the slot
/// from `T`, so every entry holds a value of its slot's type.
///
/// # Example
///
/// ```rust
/// use ambient_core::{environment_value, Environment};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Retries(u8);
/// environment_value!(Retries => Retries(3));
///
/// let empty = Environment::new();
/// let tuned = empty.set(Retries(5));
///
/// assert_eq!(empty.get::<Retries>(), Retries(3));
/// assert_eq!(tuned.get::<Retries>(), Retries(5));
/// ```
#[derive(Clone, Default)]
pub struct Environment {
    entries: Arc<HashMap<SlotId, Entry>>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new environment with `T`'s slot bound to `value`.
    ///
    /// Any value previously bound for `T` is replaced in the result. The
    /// receiver keeps its own binding.
    #[must_use = "set returns a new environment and leaves the receiver unchanged"]
    pub fn set<T: EnvironmentValue>(&self, value: T) -> Self {
        let mut entries = HashMap::clone(&self.entries);
        entries.insert(SlotId::of::<T>(), Arc::new(value) as Entry);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Borrow the value bound for `T`, if any.
    pub fn lookup<T: EnvironmentValue>(&self) -> Option<&T> {
        let slot = SlotId::of::<T>();
        let entry = self.entries.get(&slot)?;
        let value = (**entry).downcast_ref::<T>();
        if value.is_none() {
            tracing::error!(%slot, "environment entry does not hold its slot type");
        }
        value
    }

    /// The value bound for `T`, else `T`'s default.
    pub fn get<T: EnvironmentValue>(&self) -> T {
        ValueSource::get(self)
    }

    /// True if a value is bound for `T`.
    pub fn contains<T: EnvironmentValue>(&self) -> bool {
        self.contains_slot(SlotId::of::<T>())
    }

    /// True if a value is bound in `slot`.
    pub fn contains_slot(&self, slot: SlotId) -> bool {
        self.entries.contains_key(&slot)
    }

    /// Number of bound slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The bound slots, sorted by type name.
    pub fn slots(&self) -> Vec<SlotId> {
        let mut slots: Vec<SlotId> = self.entries.keys().copied().collect();
        slots.sort();
        slots
    }

    /// Combine two environments. Bindings in `other` win.
    #[must_use = "merge returns a new environment and leaves the receiver unchanged"]
    pub fn merge(&self, other: &Environment) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let mut entries = HashMap::clone(&self.entries);
        for (slot, entry) in other.entries.iter() {
            entries.insert(*slot, Arc::clone(entry));
        }
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl ValueSource for Environment {
    fn lookup<T: EnvironmentValue>(&self) -> Option<&T> {
        Environment::lookup(self)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&'static str> = self.slots().iter().map(SlotId::name).collect();
        f.debug_struct("Environment")
            .field("slots", &names)
            .finish()
    }
}

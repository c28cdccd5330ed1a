//! Slot keys: per-type storage identifiers.
//!
//! A [`Slot<T>`] is the typed handle, a [`SlotId`] the erased key used inside
//! an [`Environment`](crate::Environment). Both are derived from `T` alone.

use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::EnvironmentValue;

/// Erased identifier of the slot a value type lives in.
///
/// Equality and hashing use the `TypeId` only. The type name is kept for
/// diagnostics and ordering.
#[derive(Clone, Copy)]
pub struct SlotId {
    type_id: TypeId,
    name: &'static str,
}

impl SlotId {
    /// The slot of `T`.
    pub fn of<T: EnvironmentValue>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The full type name of the value stored in this slot.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The `TypeId` of the value stored in this slot.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// True if this is the slot of `T`.
    pub fn is<T: EnvironmentValue>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for SlotId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for SlotId {}

impl Hash for SlotId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl PartialOrd for SlotId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlotId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(other.name)
            .then_with(|| self.type_id.cmp(&other.type_id))
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.name)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Typed key binding a value type to its slot and default provider.
///
/// Zero-sized. Obtain one with [`EnvironmentValue::slot`] or [`Slot::new`].
pub struct Slot<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    /// Create the slot handle for `T`.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: EnvironmentValue> Slot<T> {
    /// The erased key of this slot.
    pub fn id(&self) -> SlotId {
        SlotId::of::<T>()
    }

    /// The default value of the bound type.
    pub fn default_value(&self) -> T {
        T::default_value()
    }

    /// The full type name of the bound type.
    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for Slot<T> {}

impl<T: EnvironmentValue> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot<{}>", self.type_name())
    }
}

impl<T: EnvironmentValue> From<Slot<T>> for SlotId {
    fn from(slot: Slot<T>) -> Self {
        slot.id()
    }
}

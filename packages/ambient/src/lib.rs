//! Ambient: typed environment values with scoped overrides.
//!
//! A type opts into the environment by implementing [`EnvironmentValue`],
//! which gives it a default and a storage slot derived from the type itself.
//! Hierarchy code threads a [`Scope`] through its tree, calling
//! [`Scope::inject`] where a subtree should see a different value and
//! [`Scope::get`] wherever a value is needed. Reads never fail: without an
//! override the declared default is returned.
//!
//! Enable the `serde` feature to load overrides from JSON documents with
//! `ambient::serde::Loader`.

pub use ambient_core::{
    environment_value, Ancestors, Environment, EnvironmentValue, Resolution, Scope, Slot, SlotId,
    ValueSource,
};

#[cfg(feature = "serde")]
pub use ambient_serde as serde;

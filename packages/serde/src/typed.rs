//! Named values and JSON read/write extension traits.

use serde::de::DeserializeOwned;
use serde::Serialize;

use ambient_core::{Environment, EnvironmentValue, Scope, ValueSource};

use crate::error::{Error, Result};

/// An environment value with a stable key in serde documents.
///
/// The key is what a document uses to address the value, e.g. `"style"` in
/// `{"style": {"color": "red"}}`. It has no meaning inside the core, where
/// values are still addressed by type.
///
/// # Example
///
/// ```rust
/// use ambient_core::environment_value;
/// use ambient_serde::NamedValue;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Style {
///     color: String,
/// }
///
/// environment_value!(Style => Style { color: "blue".into() });
///
/// impl NamedValue for Style {
///     const KEY: &'static str = "style";
/// }
/// ```
pub trait NamedValue: EnvironmentValue + Serialize + DeserializeOwned {
    /// Key of the value in documents.
    const KEY: &'static str;
}

/// Extension trait for reading effective values as JSON.
///
/// Automatically implemented for every [`ValueSource`].
pub trait JsonReader: ValueSource {
    /// Serialize the effective value of `T` (override or default).
    fn read_json<T: NamedValue>(&self) -> Result<serde_json::Value> {
        self.with(|value: &T| serde_json::to_value(value))
            .map_err(|source| Error::Encode {
                key: T::KEY,
                source,
            })
    }
}

// Blanket implementation for all value sources
impl<S: ValueSource + ?Sized> JsonReader for S {}

/// Extension trait for binding values decoded from JSON.
pub trait JsonWriter {
    /// What a write produces: a new environment or a child scope.
    type Output;

    /// Deserialize `raw` as `T` and bind it.
    fn write_json<T: NamedValue>(&self, raw: serde_json::Value) -> Result<Self::Output>;
}

fn decode<T: NamedValue>(raw: serde_json::Value) -> Result<T> {
    serde_json::from_value(raw).map_err(|source| Error::Decode {
        key: T::KEY,
        source,
    })
}

impl JsonWriter for Environment {
    type Output = Environment;

    fn write_json<T: NamedValue>(&self, raw: serde_json::Value) -> Result<Environment> {
        Ok(self.set(decode::<T>(raw)?))
    }
}

impl JsonWriter for Scope {
    type Output = Scope;

    fn write_json<T: NamedValue>(&self, raw: serde_json::Value) -> Result<Scope> {
        Ok(self.inject(decode::<T>(raw)?))
    }
}

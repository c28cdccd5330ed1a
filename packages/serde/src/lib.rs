//! Serde Integration for Ambient Environments
//!
//! The core addresses environment values by type only. This layer gives
//! value types a stable name so environments can be described by documents:
//! - `NamedValue`: an environment value with a document key
//! - `JsonReader` / `JsonWriter`: read and bind single values as JSON
//! - `Loader`: build environments from JSON documents and files, and
//!   snapshot the effective values of a scope
//!
//! # Example
//!
//! ```rust
//! use ambient_core::{environment_value, Scope};
//! use ambient_serde::{Loader, NamedValue};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Style { color: String }
//! environment_value!(Style => Style { color: "blue".into() });
//! impl NamedValue for Style { const KEY: &'static str = "style"; }
//!
//! let loader = Loader::new().register::<Style>()?;
//! let overrides = loader.load_str(r#"{"style": {"color": "red"}}"#)?;
//! let scope = Scope::root().extend(overrides);
//!
//! assert_eq!(scope.get::<Style>().color, "red");
//! assert_eq!(loader.snapshot(&scope)?["style"]["color"], "red");
//! # Ok::<(), ambient_serde::Error>(())
//! ```

mod error;
mod loader;
mod typed;

pub use error::{Error, Result};
pub use loader::{Loader, LoaderConfig};
pub use typed::{JsonReader, JsonWriter, NamedValue};

// Re-export core types for convenience
pub use ambient_core::{Environment, EnvironmentValue, Scope, ValueSource};

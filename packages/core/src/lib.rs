//! Ambient Core: typed environment values and scoped overrides
//!
//! This layer lets independently defined types share one hierarchical,
//! ambient configuration store without a central registration table:
//! - `EnvironmentValue`: the contract a type implements to be storable
//! - `Slot` / `SlotId`: per-type storage keys, derived from the type itself
//! - `Environment`: a persistent container holding at most one value per type
//! - `Scope`: an immutable node of override chains, read nearest-first
//!
//! Reads never fail. A type that nobody overrides resolves to its declared
//! default.
//!
//! # Example
//!
//! ```rust
//! use ambient_core::{environment_value, Scope, ValueSource};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Style { color: &'static str }
//! environment_value!(Style => Style { color: "blue" });
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Size { value: u32 }
//! environment_value!(Size => Size { value: 10 });
//!
//! fn describe(scope: &impl ValueSource) -> String {
//!     format!("{} @ {}", scope.get::<Style>().color, scope.get::<Size>().value)
//! }
//!
//! let root = Scope::root();
//! let page = root.inject(Style { color: "red" });
//! let card = page.inject(Size { value: 12 });
//!
//! assert_eq!(describe(&root), "blue @ 10");
//! assert_eq!(describe(&card), "red @ 12");
//! ```

mod environment;
mod scope;
mod slot;
mod traits;
mod value;

pub use environment::Environment;
pub use scope::{Ancestors, Resolution, Scope};
pub use slot::{Slot, SlotId};
pub use traits::ValueSource;
pub use value::EnvironmentValue;

//! Loading environments from documents, and snapshotting them back.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ambient_core::{Environment, Scope, SlotId};

use crate::error::{Error, Result};
use crate::typed::{JsonReader, JsonWriter, NamedValue};

/// Options for a [`Loader`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Reject documents containing keys no registered type uses.
    ///
    /// When false (the default) such keys are skipped with a warning.
    pub strict: bool,
}

type DecodeFn = fn(&Environment, serde_json::Value) -> Result<Environment>;
type EncodeFn = fn(&Scope) -> Result<serde_json::Value>;

/// How one named value type is read and written.
struct Binding {
    slot: SlotId,
    decode: DecodeFn,
    encode: EncodeFn,
}

fn decode_into<T: NamedValue>(env: &Environment, raw: serde_json::Value) -> Result<Environment> {
    env.write_json::<T>(raw)
}

fn encode_from<T: NamedValue>(scope: &Scope) -> Result<serde_json::Value> {
    scope.read_json::<T>()
}

/// Translates between JSON documents and environments.
///
/// A loader knows a set of [`NamedValue`] types, registered by the
/// application that owns the documents. It does not change how values are
/// stored or resolved: a loaded [`Environment`] is an ordinary set of
/// overrides, typically installed with [`Scope::extend`] or used to seed a
/// root with [`Scope::from_environment`].
///
/// # Example
///
/// ```rust
/// use ambient_core::{environment_value, Scope};
/// use ambient_serde::{Loader, NamedValue};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Size { value: u32 }
/// environment_value!(Size => Size { value: 10 });
/// impl NamedValue for Size { const KEY: &'static str = "size"; }
///
/// let loader = Loader::new().register::<Size>()?;
/// let scope = loader.load_into(&Scope::root(), serde_json::json!({"size": {"value": 14}}))?;
///
/// assert_eq!(scope.get::<Size>().value, 14);
/// # Ok::<(), ambient_serde::Error>(())
/// ```
#[derive(Default)]
pub struct Loader {
    config: LoaderConfig,
    bindings: BTreeMap<&'static str, Binding>,
}

impl Loader {
    /// Create a lenient loader with no registered types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with the given options.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            bindings: BTreeMap::new(),
        }
    }

    /// The loader's options.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Register `T` under [`NamedValue::KEY`].
    ///
    /// Registering the same type twice is a no-op. Registering a different
    /// type under a key that is already taken fails.
    pub fn register<T: NamedValue>(mut self) -> Result<Self> {
        let slot = SlotId::of::<T>();
        if T::KEY.is_empty() {
            return Err(Error::EmptyKey {
                type_name: slot.name(),
            });
        }
        if let Some(existing) = self.bindings.get(T::KEY) {
            if existing.slot == slot {
                return Ok(self);
            }
            return Err(Error::DuplicateKey {
                key: T::KEY,
                existing: existing.slot.name(),
            });
        }

        tracing::debug!(key = T::KEY, value = slot.name(), "registered named value");
        self.bindings.insert(
            T::KEY,
            Binding {
                slot,
                decode: decode_into::<T>,
                encode: encode_from::<T>,
            },
        );
        Ok(self)
    }

    /// True if `T` is registered.
    pub fn is_registered<T: NamedValue>(&self) -> bool {
        self.bindings
            .get(T::KEY)
            .is_some_and(|binding| binding.slot == SlotId::of::<T>())
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.keys().copied()
    }

    /// Build an environment from a parsed document.
    ///
    /// The document must be a JSON object. Each registered key present in it
    /// is decoded into its type; registered keys that are absent stay unbound
    /// so they keep resolving through the scope chain.
    pub fn load_value(&self, document: serde_json::Value) -> Result<Environment> {
        let entries = match document {
            serde_json::Value::Object(entries) => entries,
            other => {
                return Err(Error::NotAnObject {
                    found: json_kind(&other),
                })
            }
        };

        let mut env = Environment::new();
        for (key, raw) in entries {
            match self.bindings.get(key.as_str()) {
                Some(binding) => env = (binding.decode)(&env, raw)?,
                None if self.config.strict => return Err(Error::UnknownKey { key }),
                None => tracing::warn!(%key, "ignoring unknown environment key"),
            }
        }

        tracing::debug!(values = env.len(), "loaded environment document");
        Ok(env)
    }

    /// Build an environment from JSON text.
    pub fn load_str(&self, text: &str) -> Result<Environment> {
        let document = serde_json::from_str(text).map_err(Error::Parse)?;
        self.load_value(document)
    }

    /// Build an environment from a JSON stream.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Environment> {
        let document = serde_json::from_reader(reader).map_err(Error::Parse)?;
        self.load_value(document)
    }

    /// Build an environment from a JSON file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Environment> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading environment file");
        self.load_reader(std::io::BufReader::new(file))
    }

    /// Load a document and install it as one child of `scope`.
    pub fn load_into(&self, scope: &Scope, document: serde_json::Value) -> Result<Scope> {
        Ok(scope.extend(self.load_value(document)?))
    }

    /// The effective value of every registered type at `scope`, keyed by
    /// name. Unbound types contribute their defaults.
    pub fn snapshot(&self, scope: &Scope) -> Result<serde_json::Value> {
        let mut entries = serde_json::Map::new();
        for (key, binding) in &self.bindings {
            entries.insert((*key).to_string(), (binding.encode)(scope)?);
        }
        Ok(serde_json::Value::Object(entries))
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("config", &self.config)
            .field("keys", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Style {
        color: String,
    }
    ambient_core::environment_value!(Style => Style { color: "blue".to_string() });
    impl NamedValue for Style {
        const KEY: &'static str = "style";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Size {
        value: u32,
    }
    ambient_core::environment_value!(Size => Size { value: 10 });
    impl NamedValue for Size {
        const KEY: &'static str = "size";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Impostor(u8);
    ambient_core::environment_value!(Impostor => Impostor(0));
    impl NamedValue for Impostor {
        const KEY: &'static str = "size";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Nameless;
    ambient_core::environment_value!(Nameless => Nameless);
    impl NamedValue for Nameless {
        const KEY: &'static str = "";
    }

    fn loader() -> Loader {
        Loader::new()
            .register::<Style>()
            .and_then(Loader::register::<Size>)
            .unwrap()
    }

    #[test]
    fn register_lists_keys() {
        let loader = loader();
        assert_eq!(loader.keys().collect::<Vec<_>>(), vec!["size", "style"]);
        assert!(loader.is_registered::<Style>());
        assert!(!loader.is_registered::<Impostor>());
    }

    #[test]
    fn register_same_type_twice() {
        let loader = loader().register::<Style>().unwrap();
        assert_eq!(loader.keys().count(), 2);
    }

    #[test]
    fn register_duplicate_key_fails() {
        let err = loader().register::<Impostor>().unwrap_err();
        match err {
            Error::DuplicateKey { key, existing } => {
                assert_eq!(key, "size");
                assert!(existing.ends_with("Size"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn register_empty_key_fails() {
        let err = Loader::new().register::<Nameless>().unwrap_err();
        assert!(matches!(err, Error::EmptyKey { .. }));
    }

    #[test]
    fn load_value_binds_present_keys() {
        let env = loader()
            .load_value(json!({"style": {"color": "red"}}))
            .unwrap();

        assert_eq!(env.len(), 1);
        assert_eq!(env.get::<Style>().color, "red");
        assert!(!env.contains::<Size>());
    }

    #[test]
    fn load_value_rejects_non_objects() {
        let err = loader().load_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::NotAnObject { found: "array" }));
    }

    #[test]
    fn lenient_skips_unknown_keys() {
        let env = loader()
            .load_value(json!({"colour": "red", "size": {"value": 3}}))
            .unwrap();
        assert_eq!(env.len(), 1);
        assert_eq!(env.get::<Size>().value, 3);
    }

    #[test]
    fn strict_rejects_unknown_keys() {
        let loader = Loader::with_config(LoaderConfig { strict: true })
            .register::<Style>()
            .unwrap();
        let err = loader.load_value(json!({"colour": "red"})).unwrap_err();
        match err {
            Error::UnknownKey { key } => assert_eq!(key, "colour"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_errors_name_the_key() {
        let err = loader()
            .load_value(json!({"size": {"value": "big"}}))
            .unwrap_err();
        assert!(matches!(err, Error::Decode { key: "size", .. }));
    }

    #[test]
    fn load_str_and_parse_errors() {
        let env = loader().load_str(r#"{"size": {"value": 8}}"#).unwrap();
        assert_eq!(env.get::<Size>().value, 8);

        let err = loader().load_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn load_reader() {
        let bytes = br#"{"style": {"color": "green"}}"#;
        let env = loader().load_reader(&bytes[..]).unwrap();
        assert_eq!(env.get::<Style>().color, "green");
    }

    #[test]
    fn load_into_adds_one_child() {
        let root = Scope::root().inject(Size { value: 2 });
        let child = loader()
            .load_into(&root, json!({"style": {"color": "red"}}))
            .unwrap();

        assert_eq!(child.depth(), 2);
        assert_eq!(child.get::<Style>().color, "red");
        assert_eq!(child.get::<Size>().value, 2);
        assert_eq!(root.get::<Style>().color, "blue");
    }

    #[test]
    fn snapshot_reports_effective_values() {
        let scope = Scope::root()
            .inject(Size { value: 4 })
            .inject(Size { value: 6 });
        let snapshot = loader().snapshot(&scope).unwrap();

        assert_eq!(
            snapshot,
            json!({
                "size": {"value": 6},
                "style": {"color": "blue"}
            })
        );
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: LoaderConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config, LoaderConfig::default());
        assert!(!config.strict);

        let config: LoaderConfig = serde_json::from_value(json!({"strict": true})).unwrap();
        assert!(config.strict);
    }

    #[test]
    fn debug_lists_keys() {
        let debug = format!("{:?}", loader());
        assert!(debug.contains("style"));
        assert!(debug.contains("strict: false"));
    }
}

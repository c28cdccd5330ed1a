//! Scopes: immutable override chains.
//!
//! A [`Scope`] is a node in the ambient hierarchy. It holds the overrides
//! introduced at that node and a shared reference to its parent. Reads walk
//! outward from the node to the root, and fall back to the value type's
//! default when no node binds the type. The nearest override wins.
//!
//! Scopes never change after construction. [`Scope::inject`] and
//! [`Scope::extend`] allocate a child that points at the receiver, so any
//! number of threads can read a scope while others derive new ones from it.

use std::fmt;
use std::sync::Arc;

use crate::environment::Environment;
use crate::traits::ValueSource;
use crate::EnvironmentValue;

/// Where a scope found the effective value of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Bound by the scope itself.
    Local,
    /// Bound by an ancestor `distance` links up the chain.
    Inherited {
        /// Number of parent links between the scope and the binding node.
        distance: usize,
    },
    /// Not bound anywhere in the chain; the type's default applies.
    Default,
}

/// A node of the ambient hierarchy.
///
/// Cloning a `Scope` clones the handle, not the chain.
///
/// # Example
///
/// ```rust
/// use ambient_core::{environment_value, Scope};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Style { color: &'static str }
/// environment_value!(Style => Style { color: "blue" });
///
/// let root = Scope::root();
/// let red = root.inject(Style { color: "red" });
///
/// assert_eq!(red.get::<Style>().color, "red");
/// assert_eq!(root.get::<Style>().color, "blue");
/// ```
#[derive(Clone)]
pub struct Scope {
    node: Arc<Node>,
}

struct Node {
    overrides: Environment,
    parent: Option<Scope>,
    depth: usize,
}

// Unlink the chain iteratively so that dropping the last handle to a deep
// chain does not recurse once per node.
impl Drop for Node {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(scope) = parent {
            match Arc::try_unwrap(scope.node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::root()
    }
}

impl Scope {
    /// Create a root scope with no overrides.
    pub fn root() -> Self {
        Self::from_environment(Environment::new())
    }

    /// Create a root scope seeded with `overrides`.
    pub fn from_environment(overrides: Environment) -> Self {
        Self {
            node: Arc::new(Node {
                overrides,
                parent: None,
                depth: 0,
            }),
        }
    }

    /// Derive a child scope that overrides `T` with `value`.
    ///
    /// The receiver is not modified: reads through it, and through every
    /// other child it already has, are unaffected.
    #[must_use = "inject returns the child scope and leaves the receiver unchanged"]
    pub fn inject<T: EnvironmentValue>(&self, value: T) -> Scope {
        let child = self.derive(Environment::new().set(value));
        let value = std::any::type_name::<T>();
        tracing::trace!(value, depth = child.depth(), "injected environment value");
        child
    }

    /// Derive a child scope whose local overrides are all of `overrides`.
    ///
    /// The child is created even if `overrides` is empty.
    #[must_use = "extend returns the child scope and leaves the receiver unchanged"]
    pub fn extend(&self, overrides: Environment) -> Scope {
        let child = self.derive(overrides);
        tracing::trace!(
            values = child.local().len(),
            depth = child.depth(),
            "extended environment scope"
        );
        child
    }

    fn derive(&self, overrides: Environment) -> Scope {
        Scope {
            node: Arc::new(Node {
                overrides,
                parent: Some(self.clone()),
                depth: self.node.depth + 1,
            }),
        }
    }

    /// Borrow the nearest value bound for `T` in this chain.
    pub fn lookup<T: EnvironmentValue>(&self) -> Option<&T> {
        self.ancestors()
            .find_map(|scope| scope.node.overrides.lookup::<T>())
    }

    /// The effective value of `T`: nearest override, else `T`'s default.
    pub fn get<T: EnvironmentValue>(&self) -> T {
        ValueSource::get(self)
    }

    /// Report where the effective value of `T` comes from.
    pub fn resolution<T: EnvironmentValue>(&self) -> Resolution {
        let found = self
            .ancestors()
            .position(|scope| scope.node.overrides.contains::<T>());
        match found {
            Some(0) => Resolution::Local,
            Some(distance) => Resolution::Inherited { distance },
            None => Resolution::Default,
        }
    }

    /// The overrides introduced by this node, excluding ancestors.
    pub fn local(&self) -> &Environment {
        &self.node.overrides
    }

    /// The enclosing scope, or `None` at the root.
    pub fn parent(&self) -> Option<&Scope> {
        self.node.parent.as_ref()
    }

    /// Number of parent links between this scope and its root.
    pub fn depth(&self) -> usize {
        self.node.depth
    }

    /// True if this scope has no parent.
    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// Iterate from this scope up to the root, this scope first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Collapse the chain into one environment holding every effective
    /// override. Nearer bindings win.
    pub fn flatten(&self) -> Environment {
        let chain: Vec<&Scope> = self.ancestors().collect();
        chain
            .into_iter()
            .rev()
            .fold(Environment::new(), |flat, scope| flat.merge(scope.local()))
    }

    /// True if both handles point at the same node.
    pub fn same_node(&self, other: &Scope) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl ValueSource for Scope {
    fn lookup<T: EnvironmentValue>(&self) -> Option<&T> {
        Scope::lookup(self)
    }
}

impl From<Environment> for Scope {
    fn from(overrides: Environment) -> Self {
        Scope::from_environment(overrides)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("depth", &self.depth())
            .field("local", self.local())
            .finish()
    }
}

/// Iterator over a scope and its ancestors. See [`Scope::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a Scope>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(scope) => (scope.depth() + 1, Some(scope.depth() + 1)),
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for Ancestors<'_> {}

impl std::iter::FusedIterator for Ancestors<'_> {}

//! Immutable attribute storage backing descriptions.
use std::{any::Any, fmt, sync::Arc};

/// A type-erased attribute value.
///
/// Values are reference-counted so that deriving a new bag from an existing
/// one shares the unchanged entries.
pub type Value = Arc<dyn Any + Send + Sync>;

/// An immutable mapping from attribute name to value.
///
/// A bag is created empty or from a list of pairs when a description is
/// built, and is never mutated afterwards: "updates" produce a new bag owned
/// by a new description, sharing structure with the original.
#[derive(Clone, Default)]
pub struct AttributeBag {
    map: im::HashMap<&'static str, Value>,
}

impl fmt::Debug for AttributeBag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

impl AttributeBag {
    /// Creates a new, empty bag.
    pub fn new() -> AttributeBag {
        AttributeBag {
            map: Default::default(),
        }
    }

    /// Returns the value for `name`, downcast to `T`.
    ///
    /// Returns `None` if the attribute is absent or holds a value of another
    /// type.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.map.get(name)?.downcast_ref()
    }

    /// Returns the type-erased value for `name`.
    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    /// Returns whether the bag holds a value for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Returns a new bag that adds or overrides the given attribute.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(&self, name: &'static str, value: T) -> AttributeBag {
        self.with_raw(name, Arc::new(value))
    }

    /// Like [`with`](Self::with), for an already-erased value.
    #[must_use]
    pub fn with_raw(&self, name: &'static str, value: Value) -> AttributeBag {
        AttributeBag {
            map: self.map.update(name, value),
        }
    }

    /// Returns the union of two bags. Entries of `self` win on collision.
    #[must_use]
    pub fn union(self, other: AttributeBag) -> AttributeBag {
        AttributeBag {
            map: self.map.union(other.map),
        }
    }

    /// Number of attributes in the bag.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(&'static str, Value)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (&'static str, Value)>>(iter: I) -> AttributeBag {
        AttributeBag {
            map: iter.into_iter().collect(),
        }
    }
}

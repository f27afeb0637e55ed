//! Per-member binding metadata.
//!
//! For every bound member of a widget type the front end (a code generator,
//! or a hand-written registration) supplies one [`Member`] entry: the member
//! name, its classification, a default value and the equality/hash functions
//! the reconciler and the structural key use. Everything is a plain `fn`
//! pointer so tables can be emitted as `static`s.

use crate::{
    attribute::Value,
    data::Data,
    description::Description,
    key,
};
use std::{
    any::Any,
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Erased equality comparer over two attribute values.
pub type SameFn = fn(&dyn Any, &dyn Any) -> bool;

/// Erased hasher over one attribute value.
pub type HashFn = fn(&dyn Any) -> u64;

/// Produces a member's declared default value.
pub type DefaultFn = fn() -> Value;

/// Classification of a bound member, deciding which apply path it takes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MemberKind {
    /// A plain value: compared, and assigned on change.
    Scalar,
    /// A nested object described by a child [`Description`].
    Child,
    /// An ordered collection of child [`Description`]s.
    ChildList,
}

/// Binding metadata for one member of a bound widget type.
#[derive(Copy, Clone, Debug)]
pub struct Member {
    /// Member name on the target, and the attribute key in the bag.
    pub name: &'static str,
    /// Public-facing name used by the accessor layer to disambiguate
    /// same-named members across unrelated types. Not consulted by the
    /// runtime core.
    pub unique_name: Option<&'static str>,
    pub kind: MemberKind,
    /// Declared default, used when a description carries no value for the
    /// member. Always present for scalars.
    pub default: Option<DefaultFn>,
    /// Equality comparer; [`Member::scalar`] installs natural [`Data`]
    /// equality, custom comparers go through [`Member::scalar_with`].
    pub same: SameFn,
    pub hash: HashFn,
}

impl Member {
    /// A scalar member compared with natural [`Data`] equality.
    pub const fn scalar<T: Data + Hash>(name: &'static str, default: DefaultFn) -> Member {
        Member {
            name,
            unique_name: None,
            kind: MemberKind::Scalar,
            default: Some(default),
            same: same_of::<T>,
            hash: hash_of::<T>,
        }
    }

    /// A scalar member with a custom comparer and hasher.
    ///
    /// The two must agree: comparer-equal values must hash identically.
    pub const fn scalar_with(
        name: &'static str,
        default: DefaultFn,
        same: SameFn,
        hash: HashFn,
    ) -> Member {
        Member {
            name,
            unique_name: None,
            kind: MemberKind::Scalar,
            default: Some(default),
            same,
            hash,
        }
    }

    /// A nested-object member holding a child [`Description`].
    pub const fn child(name: &'static str) -> Member {
        Member {
            name,
            unique_name: None,
            kind: MemberKind::Child,
            default: None,
            same: same_description,
            hash: hash_description,
        }
    }

    /// An ordered child collection member holding a `Vec<Description>`.
    pub const fn child_list(name: &'static str) -> Member {
        Member {
            name,
            unique_name: None,
            kind: MemberKind::ChildList,
            default: None,
            same: same_child_list,
            hash: hash_child_list,
        }
    }

    pub const fn with_unique_name(mut self, unique_name: &'static str) -> Member {
        self.unique_name = Some(unique_name);
        self
    }

    /// Evaluates the member's default, if one is declared.
    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|f| f())
    }
}

/// Natural equality for scalar values of type `T`.
pub fn same_of<T: Data>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a.same(b),
        _ => false,
    }
}

/// Default hash for scalar values of type `T`.
pub fn hash_of<T: Hash + 'static>(v: &dyn Any) -> u64 {
    let Some(v) = v.downcast_ref::<T>() else {
        return 0;
    };
    let mut hasher = DefaultHasher::new();
    v.hash(&mut hasher);
    hasher.finish()
}

/// Bit-equality comparer for `f64` members (pairs with [`hash_f64`]).
pub fn same_f64(a: &dyn Any, b: &dyn Any) -> bool {
    same_of::<f64>(a, b)
}

/// Bit hash for `f64` members.
pub fn hash_f64(v: &dyn Any) -> u64 {
    v.downcast_ref::<f64>().map(|v| v.to_bits()).unwrap_or(0)
}

/// Structural equality between nested child descriptions.
pub fn same_description(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<Description>(), b.downcast_ref::<Description>()) {
        (Some(a), Some(b)) => key::structural_eq(a, b),
        _ => false,
    }
}

pub fn hash_description(v: &dyn Any) -> u64 {
    v.downcast_ref::<Description>().map(key::structural_hash).unwrap_or(0)
}

/// Element-wise structural equality between child lists.
pub fn same_child_list(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<Vec<Description>>(), b.downcast_ref::<Vec<Description>>()) {
        (Some(a), Some(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| key::structural_eq(a, b))
        }
        _ => false,
    }
}

pub fn hash_child_list(v: &dyn Any) -> u64 {
    let Some(list) = v.downcast_ref::<Vec<Description>>() else {
        return 0;
    };
    let mut h: u64 = 17;
    for child in list {
        h = h.wrapping_mul(37).wrapping_add(key::structural_hash(child));
    }
    h
}

/// Wraps a plain value the way attribute bags store it.
///
/// Convenience for `default` thunks: `|| erased(0.0f64)`-style closures do
/// not coerce to `fn` pointers with captured state, but `fn` items calling
/// `erased` do.
pub fn erased<T: Any + Send + Sync>(value: T) -> Value {
    Arc::new(value)
}

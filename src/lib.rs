//! Reconciliation engine for immutable declarative UI-element descriptions.
//!
//! A [`Description`] is a lightweight, immutable value describing the desired
//! state of one node of a UI tree: a target type tag, a factory, an ordered
//! chain of apply steps and an [`AttributeBag`] holding the bound member
//! values. Descriptions never mutate; every change produces a new description.
//!
//! The live side is a tree of mutable [`Target`] objects. To materialize a
//! description, call [`Description::materialize`]; to patch an existing target
//! in place, keep the description that produced it and call
//! [`Description::apply_incremental_to`] with the new one. The reconciler
//! diffs the two descriptions member by member and performs the minimal set of
//! mutations, reporting what it touched through [`ChangeFlags`].
//!
//! Per-widget-type constructors and member tables are expected to be emitted
//! by an external code generator (or written by hand); this crate is the
//! runtime model those bindings conform to and is agnostic to what a "widget"
//! actually is.

// public modules
pub mod attribute;
pub mod children;
pub mod data;
pub mod description;
pub mod key;
pub mod member;
pub mod reconcile;
pub mod target;

// internal modules
mod error;

#[cfg(test)]
mod fixtures;

// public exports
pub use attribute::{AttributeBag, Value};
pub use children::reconcile_children;
pub use data::Data;
pub use description::{Create, Description, TargetType};
pub use error::ApplyError;
pub use key::DescriptionKey;
pub use member::{Member, MemberKind};
pub use reconcile::{apply_members, ChangeFlags};
pub use target::{expect_scalar, ChildSlot, Target};

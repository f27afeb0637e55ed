//! Structural equality and hashing over descriptions.
//!
//! The reconcilers test descriptions by reference identity; when a
//! description has to act as a key (memoized builds, caches), structural
//! equivalence is wanted instead. Two descriptions of the same bound type are
//! structurally equal iff every bound member's value is equal under that
//! member's configured comparer, including members inherited from ancestor
//! bindings. Custom apply steps do not take part.

use crate::{attribute::AttributeBag, description::Description, member::Member};
use std::hash::{Hash, Hasher};

/// Member-wise structural equality.
///
/// Scalars absent from a bag fall back to their declared default, so setting
/// a member to its default is indistinguishable from leaving it unset.
pub fn structural_eq(a: &Description, b: &Description) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    if a.target_type() != b.target_type() {
        return false;
    }
    a.member_segments()
        .flatten()
        .all(|m| member_same(m, a.attributes(), b.attributes()))
}

/// Order-sensitive member-wise hash, consistent with [`structural_eq`].
///
/// Folds `h = h * 37 + member_hash` over bound members in declaration order,
/// base type's members first, seeded with 17. Absent members hash as their
/// default when one is declared and as 0 otherwise.
pub fn structural_hash(desc: &Description) -> u64 {
    let mut h: u64 = 17;
    for member in desc.member_segments().flatten() {
        let member_hash = desc
            .attributes()
            .get_raw(member.name)
            .cloned()
            .or_else(|| member.default_value())
            .map(|v| (member.hash)(&*v))
            .unwrap_or(0);
        h = h.wrapping_mul(37).wrapping_add(member_hash);
    }
    h
}

fn member_same(member: &Member, a: &AttributeBag, b: &AttributeBag) -> bool {
    let av = a.get_raw(member.name).cloned().or_else(|| member.default_value());
    let bv = b.get_raw(member.name).cloned().or_else(|| member.default_value());
    match (av, bv) {
        (Some(a), Some(b)) => (member.same)(&*a, &*b),
        (None, None) => true,
        _ => false,
    }
}

/// Wraps a description so it can key a hash map by structure instead of by
/// reference.
#[derive(Clone, Debug)]
pub struct DescriptionKey(pub Description);

impl PartialEq for DescriptionKey {
    fn eq(&self, other: &Self) -> bool {
        structural_eq(&self.0, &other.0)
    }
}

impl Eq for DescriptionKey {}

impl Hash for DescriptionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.target_type().hash(state);
        state.write_u64(structural_hash(&self.0));
    }
}

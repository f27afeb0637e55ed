//! Per-member apply semantics.
use crate::{
    attribute::Value,
    children,
    description::Description,
    error::ApplyError,
    member::{Member, MemberKind},
    target::Target,
};
use bitflags::bitflags;
use tracing::warn;

bitflags! {
    /// What an apply pass actually touched on the target.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ChangeFlags: u32 {
        const NONE = 0;
        /// A scalar member was written.
        const VALUE = 1 << 0;
        /// A child was created, removed or replaced.
        const STRUCTURE = 1 << 1;
    }
}

/// Runs one member-table pass of `next` against `target`.
///
/// `prev` is the description the target was last updated from, or `None` when
/// the target has no known prior description (every member then counts as
/// previously at its declared default). Dispatches on [`MemberKind`]:
///
/// - scalars are compared under the member's comparer and assigned only on
///   change; a member present in `prev` but absent in `next` is reset to its
///   declared default;
/// - nested objects are skipped when the child description is
///   reference-identical, patched in place when the live child's runtime type
///   still matches, and rebuilt otherwise;
/// - child lists are handed to [`children::reconcile_children`].
pub fn apply_members(
    members: &[Member],
    prev: Option<&Description>,
    next: &Description,
    target: &mut dyn Target,
) -> Result<ChangeFlags, ApplyError> {
    let mut flags = ChangeFlags::NONE;
    for member in members {
        match member.kind {
            MemberKind::Scalar => flags |= apply_scalar(member, prev, next, target)?,
            MemberKind::Child => flags |= apply_child(member, prev, next, target)?,
            MemberKind::ChildList => {
                let prev_list = prev.and_then(|p| p.attributes().get::<Vec<Description>>(member.name));
                let new_list = next.attributes().get::<Vec<Description>>(member.name);
                let live = target.children_mut(member.name)?;
                flags |= children::reconcile_children(
                    prev_list.map(Vec::as_slice),
                    new_list.map(Vec::as_slice).unwrap_or(&[]),
                    live,
                )?;
            }
        }
    }
    Ok(flags)
}

fn apply_scalar(
    member: &Member,
    prev: Option<&Description>,
    next: &Description,
    target: &mut dyn Target,
) -> Result<ChangeFlags, ApplyError> {
    let resolve = |desc: &Description| -> Option<Value> {
        desc.attributes()
            .get_raw(member.name)
            .cloned()
            .or_else(|| member.default_value())
    };
    // with no previous description the member counts as previously at its
    // default, so writing the default again is skipped
    let prev_value = match prev {
        Some(prev) => resolve(prev),
        None => member.default_value(),
    };
    let new_value = resolve(next);
    match (&prev_value, &new_value) {
        (Some(a), Some(b)) if (member.same)(&**a, &**b) => Ok(ChangeFlags::NONE),
        (None, None) => Ok(ChangeFlags::NONE),
        (_, Some(value)) => {
            target.set_scalar(member.name, &**value)?;
            Ok(ChangeFlags::VALUE)
        }
        // no value and no declared default: nothing to reset to
        (Some(_), None) => Ok(ChangeFlags::NONE),
    }
}

fn apply_child(
    member: &Member,
    prev: Option<&Description>,
    next: &Description,
    target: &mut dyn Target,
) -> Result<ChangeFlags, ApplyError> {
    let prev_child = prev.and_then(|p| p.attributes().get::<Description>(member.name));
    let new_child = next.attributes().get::<Description>(member.name);
    match (prev_child, new_child) {
        // caller reused the exact same child description object: the whole
        // subtree is unchanged by definition, skip the structural diff
        (Some(prev_child), Some(new_child)) if prev_child.ptr_eq(new_child) => Ok(ChangeFlags::NONE),
        (_, Some(new_child)) => {
            let slot = target.child_mut(member.name)?;
            match (prev_child, slot.take()) {
                (Some(prev_child), Some(mut live)) if new_child.target_type().matches(&*live) => {
                    let result = new_child.apply_incremental_to(prev_child, &mut *live);
                    *slot = Some(live);
                    result
                }
                (prev_child, live) => {
                    if prev_child.is_some() && live.is_none() {
                        warn!(
                            member = member.name,
                            "live child missing despite a previous description; rebuilding"
                        );
                    }
                    // type change (or no reusable instance): full rebuild, no
                    // partial reuse across incompatible types
                    *slot = Some(new_child.materialize()?);
                    Ok(ChangeFlags::STRUCTURE)
                }
            }
        }
        (Some(_), None) => {
            let slot = target.child_mut(member.name)?;
            if slot.take().is_some() {
                Ok(ChangeFlags::STRUCTURE)
            } else {
                Ok(ChangeFlags::NONE)
            }
        }
        (None, None) => Ok(ChangeFlags::NONE),
    }
}

//! Ordered child-collection diffing.
use crate::{description::Description, error::ApplyError, reconcile::ChangeFlags, target::Target};
use tracing::trace;

/// Patches a live ordered child collection from a previous/new pair of child
/// description lists.
///
/// The diff is strictly positional: live children are trimmed from the tail,
/// then each index is either left untouched (same description object),
/// patched in place (same target type) or rebuilt (new or incompatible).
/// There is no keyed matching; reordering logically identical children
/// rebuilds the moved elements. After the pass `live.len() == next.len()`.
pub fn reconcile_children(
    prev: Option<&[Description]>,
    next: &[Description],
    live: &mut Vec<Box<dyn Target>>,
) -> Result<ChangeFlags, ApplyError> {
    if next.is_empty() {
        if live.is_empty() {
            return Ok(ChangeFlags::NONE);
        }
        trace!(removed = live.len(), "clearing children");
        live.clear();
        return Ok(ChangeFlags::STRUCTURE);
    }

    let mut flags = ChangeFlags::NONE;
    if live.len() > next.len() {
        trace!(removed = live.len() - next.len(), "trimming trailing children");
        live.truncate(next.len());
        flags |= ChangeFlags::STRUCTURE;
    }
    // live children at indices below this are eligible for in-place reuse
    let reusable = live.len();

    for (i, new_child) in next.iter().enumerate() {
        let prev_child = match prev {
            Some(prev) if i < reusable => prev.get(i),
            _ => None,
        };
        match prev_child {
            Some(prev_child) if prev_child.ptr_eq(new_child) => {
                // unchanged subtree, reused verbatim
            }
            Some(prev_child) if prev_child.target_type() == new_child.target_type() => {
                flags |= new_child.apply_incremental_to(prev_child, &mut *live[i])?;
            }
            _ => {
                let built = new_child.materialize()?;
                if i < live.len() {
                    trace!(index = i, "replacing child");
                    live[i] = built;
                } else {
                    trace!(index = i, "appending child");
                    live.push(built);
                }
                flags |= ChangeFlags::STRUCTURE;
            }
        }
    }

    debug_assert_eq!(live.len(), next.len());
    Ok(flags)
}

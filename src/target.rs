//! The live, mutable side of the tree.
use crate::ApplyError;
use std::any::Any;

/// A nested-object member slot on a target.
///
/// Empty either because nothing was ever assigned or because a description
/// removed the child.
pub type ChildSlot = Option<Box<dyn Target>>;

/// A live, mutable object a description can be materialized into or applied
/// onto.
///
/// The engine assumes nothing about widgets beyond this trait: settable named
/// members, and for some members a nested-object slot or an ordered child
/// collection. Member names are resolved dynamically; a name with no
/// corresponding member surfaces [`ApplyError::MissingMember`]. A target type
/// standing in for a "derived" widget answers for its base's member names as
/// well, which is how one description chain applies across an inheritance
/// hierarchy without language-level subtyping.
///
/// Application mutates targets directly and without guards; it must only ever
/// run on the thread that owns the target tree.
pub trait Target: Any {
    /// Name of the concrete target type, for diagnostics.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Assigns a scalar member.
    ///
    /// The value is type-erased; implementations downcast it (see
    /// [`expect_scalar`]) and store a clone.
    fn set_scalar(&mut self, member: &'static str, value: &dyn Any) -> Result<(), ApplyError>;

    /// Mutable access to a nested-object member slot.
    fn child_mut(&mut self, member: &'static str) -> Result<&mut ChildSlot, ApplyError> {
        Err(ApplyError::MissingMember {
            target: self.type_name(),
            member,
        })
    }

    /// Mutable access to an ordered child collection member.
    fn children_mut(&mut self, member: &'static str) -> Result<&mut Vec<Box<dyn Target>>, ApplyError> {
        Err(ApplyError::MissingMember {
            target: self.type_name(),
            member,
        })
    }
}

impl std::fmt::Debug for dyn Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

impl Target for Box<dyn Target> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        (**self).as_any_mut()
    }

    fn set_scalar(&mut self, member: &'static str, value: &dyn Any) -> Result<(), ApplyError> {
        (**self).set_scalar(member, value)
    }

    fn child_mut(&mut self, member: &'static str) -> Result<&mut ChildSlot, ApplyError> {
        (**self).child_mut(member)
    }

    fn children_mut(&mut self, member: &'static str) -> Result<&mut Vec<Box<dyn Target>>, ApplyError> {
        (**self).children_mut(member)
    }
}

/// Downcasts a type-erased attribute value to the type a member stores.
///
/// Helper for `set_scalar` implementations.
pub fn expect_scalar<T: Clone + 'static>(value: &dyn Any) -> Result<T, ApplyError> {
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or(ApplyError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: "attribute value of another type",
        })
}

//! Immutable element descriptions.
use crate::{
    attribute::AttributeBag,
    error::ApplyError,
    member::Member,
    reconcile::{self, ChangeFlags},
    target::Target,
};
use smallvec::SmallVec;
use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Identifies the concrete target type a description materializes into.
#[derive(Copy, Clone, Debug)]
pub struct TargetType {
    name: &'static str,
    id: TypeId,
}

impl TargetType {
    pub fn of<T: 'static>() -> TargetType {
        TargetType {
            name: std::any::type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Diagnostic name of the target type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Whether the given live target is an instance of this type.
    pub fn matches(&self, target: &dyn Target) -> bool {
        target.as_any().type_id() == self.id
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TargetType {}

impl std::hash::Hash for TargetType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Factory producing a new, uninitialized target instance.
#[derive(Copy, Clone)]
pub enum Create {
    /// The target type is abstract or has no zero-argument constructor;
    /// invoking the factory fails with [`ApplyError::UnsupportedCreate`].
    Unsupported,
    New(fn() -> Box<dyn Target>),
}

/// A hand-written apply step appended with [`Description::with_apply`].
pub type CustomApplyFn =
    Arc<dyn Fn(Option<&Description>, &Description, &mut dyn Target) -> Result<ChangeFlags, ApplyError> + Send + Sync>;

#[derive(Clone)]
enum ApplyStep {
    /// Standard table-driven pass over a member segment. This is what
    /// generated bindings use; the segments double as the member declaration
    /// order for structural equality and hashing.
    Members(&'static [Member]),
    Custom(CustomApplyFn),
}

#[derive(Clone)]
struct Inner {
    target_type: TargetType,
    create: Create,
    /// Ordered apply chain. [`Description::inherit`] appends, so base steps
    /// always run first and derived steps can override what they wrote.
    steps: SmallVec<[ApplyStep; 2]>,
    attributes: AttributeBag,
}

/// An immutable description of one node of a UI tree.
///
/// Descriptions are values: cheap to clone, shareable across threads, never
/// mutated. "Changing" one means deriving a new description (via
/// [`with_attribute`](Self::with_attribute) or a fresh build) and diffing it
/// against the old one with
/// [`apply_incremental_to`](Self::apply_incremental_to).
///
/// There is no identity field. Two descriptions correspond to the same
/// logical node across time only by caller-supplied pairing: the position in
/// a parent's child list, or an explicit previous/new pair. Reference
/// equality ([`ptr_eq`](Self::ptr_eq)) is the reconcilers' "unchanged
/// subtree" shortcut.
#[derive(Clone)]
pub struct Description(Arc<Inner>);

impl fmt::Debug for Description {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Description")
            .field("target_type", &self.0.target_type.name)
            .field("attributes", &self.0.attributes)
            .finish_non_exhaustive()
    }
}

impl Description {
    /// Builds a description for a root bound type.
    pub fn new(
        target_type: TargetType,
        create: Create,
        members: &'static [Member],
        attributes: AttributeBag,
    ) -> Description {
        let mut steps = SmallVec::new();
        steps.push(ApplyStep::Members(members));
        Description(Arc::new(Inner {
            target_type,
            create,
            steps,
            attributes,
        }))
    }

    /// Builds a description for a type derived from `self`'s bound type.
    ///
    /// The result applies `self`'s steps first and the new member segment
    /// after, and its attribute bag is the union of the two with `attributes`
    /// winning on collision. The base-then-derived order is load-bearing:
    /// derived mutations must be able to override base defaults written
    /// moments earlier.
    #[must_use]
    pub fn inherit(
        &self,
        target_type: TargetType,
        create: Create,
        members: &'static [Member],
        attributes: AttributeBag,
    ) -> Description {
        let mut steps = self.0.steps.clone();
        steps.push(ApplyStep::Members(members));
        Description(Arc::new(Inner {
            target_type,
            create,
            steps,
            attributes: attributes.union(self.0.attributes.clone()),
        }))
    }

    /// Returns a new description with one attribute added or overridden.
    ///
    /// This is the primitive behind generated `with_<member>` setters.
    #[must_use]
    pub fn with_attribute<T: Any + Send + Sync>(&self, name: &'static str, value: T) -> Description {
        let mut inner = (*self.0).clone();
        inner.attributes = inner.attributes.with(name, value);
        Description(Arc::new(inner))
    }

    /// Appends a custom apply step, run after all existing steps.
    ///
    /// Custom steps take part in application only; structural equality and
    /// hashing are defined over the bound member tables.
    #[must_use]
    pub fn with_apply(
        &self,
        f: impl Fn(Option<&Description>, &Description, &mut dyn Target) -> Result<ChangeFlags, ApplyError>
            + Send
            + Sync
            + 'static,
    ) -> Description {
        let mut inner = (*self.0).clone();
        inner.steps.push(ApplyStep::Custom(Arc::new(f)));
        Description(Arc::new(inner))
    }

    pub fn target_type(&self) -> TargetType {
        self.0.target_type
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.0.attributes
    }

    /// Whether `self` and `other` are the same description object.
    pub fn ptr_eq(&self, other: &Description) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Member segments in declaration order, base segments first.
    pub(crate) fn member_segments(&self) -> impl Iterator<Item = &'static [Member]> + '_ {
        self.0.steps.iter().filter_map(|step| match step {
            ApplyStep::Members(members) => Some(*members),
            ApplyStep::Custom(_) => None,
        })
    }

    /// Invokes the factory, producing a new, uninitialized target.
    pub fn create(&self) -> Result<Box<dyn Target>, ApplyError> {
        match self.0.create {
            Create::Unsupported => Err(ApplyError::UnsupportedCreate(self.0.target_type.name)),
            Create::New(f) => Ok(f()),
        }
    }

    /// Creates a new target and fully applies this description to it.
    pub fn materialize(&self) -> Result<Box<dyn Target>, ApplyError> {
        let mut target = self.create()?;
        self.apply_to(&mut *target)?;
        Ok(target)
    }

    /// Applies this description to a target with no known prior description.
    ///
    /// Every member is treated as previously absent, i.e. previously at its
    /// declared default.
    pub fn apply_to(&self, target: &mut dyn Target) -> Result<ChangeFlags, ApplyError> {
        self.apply(None, target)
    }

    /// Applies this description to a target last updated from `previous`,
    /// skipping unchanged members and reusing live sub-objects.
    ///
    /// `previous`, `self` and `target` must agree on target type; a mismatch
    /// is surfaced as [`ApplyError::TypeMismatch`], never ignored. On error
    /// the target may be left partially updated.
    pub fn apply_incremental_to(
        &self,
        previous: &Description,
        target: &mut dyn Target,
    ) -> Result<ChangeFlags, ApplyError> {
        if previous.0.target_type != self.0.target_type {
            return Err(ApplyError::TypeMismatch {
                expected: self.0.target_type.name,
                found: previous.0.target_type.name,
            });
        }
        self.apply(Some(previous), target)
    }

    fn apply(&self, previous: Option<&Description>, target: &mut dyn Target) -> Result<ChangeFlags, ApplyError> {
        if !self.0.target_type.matches(target) {
            return Err(ApplyError::TypeMismatch {
                expected: self.0.target_type.name,
                found: target.type_name(),
            });
        }
        let mut flags = ChangeFlags::NONE;
        for step in &self.0.steps {
            match step {
                ApplyStep::Members(members) => {
                    flags |= reconcile::apply_members(members, previous, self, target)?;
                }
                ApplyStep::Custom(f) => {
                    flags |= f(previous, self, target)?;
                }
            }
        }
        Ok(flags)
    }
}

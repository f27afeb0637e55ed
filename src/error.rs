use thiserror::Error;

/// Errors surfaced while materializing a description or applying it to a
/// live target.
///
/// None of these are caught internally: a failure aborts the current apply
/// call, and members processed before the failing one keep their new values.
/// Callers that need atomicity must snapshot and roll back above this layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// The factory was invoked on a description whose target type is abstract
    /// or has no zero-argument constructor.
    #[error("cannot create an instance of `{0}`")]
    UnsupportedCreate(&'static str),

    /// The previous/new/target triple of an incremental apply disagree on
    /// target type, or an attribute value does not have the type the target
    /// member expects. Indicates caller misuse of the previous/new pairing.
    #[error("target type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A bound member name has no corresponding member on the live target.
    #[error("target type `{target}` has no member named `{member}`")]
    MissingMember {
        target: &'static str,
        member: &'static str,
    },
}

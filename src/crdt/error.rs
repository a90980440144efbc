// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Error types for the document engine.

use thiserror::Error;

use super::op::Index;
use super::op::Shape;
use super::primitives::Id;

/// Errors raised while applying operations or addressing the document.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An operation addressed a container whose shape does not match its kind.
    ///
    /// Container shape is fixed at creation, so this is a defect in the
    /// operation stream. The submit that carried the operation is rejected
    /// and the replica is left as it was.
    #[error("operation {op:?} expects a {expected} at {parent:?}, found a {found}")]
    StructuralConflict {
        op: Id,
        parent: Id,
        expected: Shape,
        found: Shape,
    },

    /// A path did not lead to a live container.
    #[error("path {path:?} does not address a live container")]
    Addressing { path: Vec<Index> },

    /// An operation used an identity from the reserved sentinel range.
    #[error("operation {op:?} uses a reserved identity")]
    ReservedIdentity { op: Id },
}

impl Error {
    /// Check if this error is a container shape mismatch
    pub fn is_structural_conflict(&self) -> bool {
        return matches!(self, Error::StructuralConflict { .. });
    }

    /// Check if this error is an addressing failure
    pub fn is_addressing(&self) -> bool {
        return matches!(self, Error::Addressing { .. });
    }

    /// The offending operation, for errors raised by one.
    pub fn op(&self) -> Option<Id> {
        return match self {
            Error::StructuralConflict { op, .. } | Error::ReservedIdentity { op } => Some(*op),
            Error::Addressing { .. } => None,
        };
    }
}

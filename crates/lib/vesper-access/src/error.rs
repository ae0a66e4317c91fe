use thiserror::Error;
use vesper_reflect::{ReflectError, TypeKey};

use crate::{MemberDescriptor, Shape};

pub type AccessResult<T> = Result<T, AccessError>;

/// Failures of member lookup, thunk synthesis and cache access.
///
/// Argument mismatches raised while a thunk runs surface as [`AccessError::Reflect`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("`{target}` has no member matching `{member}`")]
    NotFound {
        target: TypeKey,
        member: String,
    },

    #[error("`{member}` is ambiguous on `{target}`: {candidates} candidates match")]
    Ambiguous {
        target: TypeKey,
        member: String,
        candidates: usize,
    },

    #[error("`{member}` on `{target}` cannot be accessed this way: {reason}")]
    InvalidTargetKind {
        target: TypeKey,
        member: String,
        reason: &'static str,
    },

    #[error("expected a {expected} thunk, found a {found} thunk")]
    ShapeMismatch {
        expected: Shape,
        found: Shape,
    },

    #[error("thunk cache has been disposed")]
    ScopeDisposed,

    #[error(transparent)]
    Reflect(#[from] ReflectError),
}

impl AccessError {
    pub fn not_found(descriptor: &MemberDescriptor) -> Self {
        Self::NotFound {
            target: descriptor.target(),
            member: descriptor.to_string(),
        }
    }

    pub fn ambiguous(descriptor: &MemberDescriptor, candidates: usize) -> Self {
        Self::Ambiguous {
            target: descriptor.target(),
            member: descriptor.to_string(),
            candidates,
        }
    }

    pub fn invalid_target(descriptor: &MemberDescriptor, reason: &'static str) -> Self {
        Self::InvalidTargetKind {
            target: descriptor.target(),
            member: descriptor.to_string(),
            reason,
        }
    }
}

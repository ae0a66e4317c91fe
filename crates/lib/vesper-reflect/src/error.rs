use thiserror::Error;

pub type ReflectResult<T> = Result<T, ReflectError>;

/// Failures raised while touching reflected values at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    #[error("incompatible argument: expected `{expected}`, found `{found}`")]
    IncompatibleArgument {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected {expected} argument(s), found {found}")]
    ArgumentCount {
        expected: usize,
        found: usize,
    },

    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },

    #[error("instance member of `{0}` called without a receiver")]
    MissingReceiver(&'static str),

    #[error("receiver of `{0}` is read-only here")]
    ReadOnlyTarget(&'static str),

    #[error("`{member}` cannot be {action}")]
    Unsupported {
        member: String,
        action: &'static str,
    },

    /// A registered member body failed on its own terms.
    #[error("{0}")]
    Invocation(String),
}

impl ReflectError {
    pub fn unsupported(member: impl Into<String>, action: &'static str) -> Self {
        Self::Unsupported {
            member: member.into(),
            action,
        }
    }

    pub fn incompatible<Expected: ?Sized>(found: &'static str) -> Self {
        Self::IncompatibleArgument {
            expected: std::any::type_name::<Expected>(),
            found,
        }
    }
}

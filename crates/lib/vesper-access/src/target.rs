use vesper_reflect::{Reflect, ReflectError, ReflectResult, TypeInfo, TypeKey};

use crate::{ObjectRef, ReceiverKind, ValueHolder};

/// Receiver handed to a thunk.
pub enum Target<'a> {
    /// No receiver, for static members.
    Static,
    /// Borrowed instance. Only thunks that read accept it.
    Ref(&'a dyn Reflect),
    /// Instance of a reference-semantics type.
    Shared(&'a ObjectRef),
    /// Instance of a value-semantics type, mutated in place.
    Boxed(&'a mut ValueHolder),
}

impl<'a> Target<'a> {
    pub fn kind(&self) -> ReceiverKind {
        match self {
            Self::Static => ReceiverKind::Static,
            Self::Ref(_) | Self::Shared(_) => ReceiverKind::Instance,
            Self::Boxed(_) => ReceiverKind::Boxed,
        }
    }

    /// Concrete type of the receiver, `None` for [`Target::Static`].
    pub fn type_key(&self) -> Option<TypeKey> {
        match self {
            Self::Static => None,
            Self::Ref(instance) => Some(TypeKey::of_value(*instance)),
            Self::Shared(object) => Some(object.type_key()),
            Self::Boxed(holder) => Some(holder.type_key()),
        }
    }

    /// Runtime type info of the receiver, `None` for [`Target::Static`].
    pub fn type_info(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::Static => None,
            Self::Ref(instance) => Some(instance.get_type_info()),
            Self::Shared(object) => Some(object.read().get_type_info()),
            Self::Boxed(holder) => Some(holder.get().get_type_info()),
        }
    }

    /// Shorter-lived copy of this target, so one receiver can serve several calls.
    pub fn reborrow(&mut self) -> Target<'_> {
        match self {
            Self::Static => Target::Static,
            Self::Ref(instance) => Target::Ref(*instance),
            Self::Shared(object) => Target::Shared(*object),
            Self::Boxed(holder) => Target::Boxed(&mut **holder),
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Self::Static => "Target::Static",
            Self::Ref(_) => "Target::Ref",
            Self::Shared(_) => "Target::Shared",
            Self::Boxed(_) => "Target::Boxed",
        }
    }

    /// Succeeds only for [`Target::Static`].
    pub(crate) fn expect_static(self) -> ReflectResult<()> {
        match self {
            Self::Static => Ok(()),
            other => Err(other.mismatch(ReceiverKind::Static)),
        }
    }

    /// Read access to the receiver of a member declared on `expected`.
    pub(crate) fn read<R>(
        self,
        receiver: ReceiverKind,
        expected: TypeKey,
        f: impl FnOnce(&dyn Reflect) -> ReflectResult<R>,
    ) -> ReflectResult<R> {
        match (receiver, self) {
            (ReceiverKind::Instance, Self::Ref(instance)) => f(checked(instance, expected)?),
            (ReceiverKind::Instance, Self::Shared(object)) => {
                let instance = object.read();
                f(checked(&**instance, expected)?)
            }
            (ReceiverKind::Boxed, Self::Boxed(holder)) => f(checked(holder.get(), expected)?),
            (receiver, other) => Err(other.mismatch(receiver)),
        }
    }

    /// Write access to the receiver of a member declared on `expected`.
    pub(crate) fn write<R>(
        self,
        receiver: ReceiverKind,
        expected: TypeKey,
        f: impl FnOnce(&mut dyn Reflect) -> ReflectResult<R>,
    ) -> ReflectResult<R> {
        match (receiver, self) {
            (ReceiverKind::Instance, Self::Ref(_)) => Err(ReflectError::ReadOnlyTarget(expected.name())),
            (ReceiverKind::Instance, Self::Shared(object)) => {
                let mut instance = object.write();
                f(checked_mut(&mut **instance, expected)?)
            }
            (ReceiverKind::Boxed, Self::Boxed(holder)) => f(checked_mut(holder.get_mut(), expected)?),
            (receiver, other) => Err(other.mismatch(receiver)),
        }
    }

    fn mismatch(&self, receiver: ReceiverKind) -> ReflectError {
        let expected = match receiver {
            ReceiverKind::Static => "Target::Static",
            ReceiverKind::Instance => "Target::Ref or Target::Shared",
            ReceiverKind::Boxed => "Target::Boxed",
        };
        ReflectError::IncompatibleArgument {
            expected,
            found: self.variant_name(),
        }
    }
}

fn checked(instance: &dyn Reflect, expected: TypeKey) -> ReflectResult<&dyn Reflect> {
    if expected.accepts(&TypeKey::of_value(instance)) {
        Ok(instance)
    } else {
        Err(ReflectError::IncompatibleArgument {
            expected: expected.name(),
            found: instance.type_name(),
        })
    }
}

fn checked_mut(instance: &mut dyn Reflect, expected: TypeKey) -> ReflectResult<&mut dyn Reflect> {
    if expected.accepts(&TypeKey::of_value(instance)) {
        Ok(instance)
    } else {
        Err(ReflectError::IncompatibleArgument {
            expected: expected.name(),
            found: instance.type_name(),
        })
    }
}

use crate::{Reflect, ReflectError, ReflectResult, TypeKey, Value, cast};

/// Positional arguments handed to a registered member body.
///
/// Built by [`Args::checked`], so a body can rely on the count and the
/// runtime type of every argument matching its declared signature.
#[derive(Debug, Default)]
pub struct Args {
    values: Vec<Option<Value>>,
}

impl Args {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check `values` against `params` and wrap them.
    pub fn checked(params: &[TypeKey], values: Vec<Value>) -> ReflectResult<Self> {
        if params.len() != values.len() {
            return Err(ReflectError::ArgumentCount {
                expected: params.len(),
                found: values.len(),
            });
        }

        for (param, value) in params.iter().zip(&values) {
            if !param.accepts(&TypeKey::of_value(&**value)) {
                return Err(ReflectError::IncompatibleArgument {
                    expected: param.name(),
                    found: value.type_name(),
                });
            }
        }

        Ok(Self {
            values: values.into_iter().map(Some).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Move the argument at `index` out, narrowed to `A`.
    pub fn take<A: Reflect>(&mut self, index: usize) -> ReflectResult<A> {
        cast::<A>(self.take_value(index)?)
    }

    pub fn take_value(&mut self, index: usize) -> ReflectResult<Value> {
        let len = self.values.len();
        self.values
            .get_mut(index)
            .ok_or(ReflectError::IndexOutOfBounds { index, len })?
            .take()
            .ok_or_else(|| ReflectError::Invocation(format!("argument {index} was already taken")))
    }

    pub fn get<A: Reflect>(&self, index: usize) -> ReflectResult<&A> {
        let len = self.values.len();
        let value = self.values
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(ReflectError::IndexOutOfBounds { index, len })?;

        value.downcast_ref::<A>()
            .ok_or_else(|| ReflectError::incompatible::<A>(value.type_name()))
    }
}

/// Narrow the receiver of an instance member.
pub(crate) fn receiver<'a, T: Reflect>(receiver: Option<&'a dyn Reflect>) -> ReflectResult<&'a T> {
    let receiver = receiver.ok_or(ReflectError::MissingReceiver(std::any::type_name::<T>()))?;
    receiver.downcast_ref::<T>()
        .ok_or_else(|| ReflectError::incompatible::<T>(receiver.type_name()))
}

pub(crate) fn receiver_mut<'a, T: Reflect>(receiver: Option<&'a mut dyn Reflect>) -> ReflectResult<&'a mut T> {
    let receiver = receiver.ok_or(ReflectError::MissingReceiver(std::any::type_name::<T>()))?;
    let found = receiver.type_name();
    receiver.downcast_mut::<T>()
        .ok_or_else(|| ReflectError::incompatible::<T>(found))
}

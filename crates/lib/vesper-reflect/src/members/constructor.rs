use std::{fmt::Debug, sync::Arc};

use crate::{Reflect, ReflectResult, TypeKey, Value};

use super::Args;

pub type ConstructorFn = Arc<dyn Fn(Args) -> ReflectResult<Value> + Send + Sync>;

/// Registered constructor of a type, selected by its parameter types.
#[derive(Clone)]
pub struct ConstructorInfo {
    target: TypeKey,
    params: Vec<TypeKey>,
    body: ConstructorFn,
}

impl ConstructorInfo {
    pub fn new<T, F>(params: &[TypeKey], body: F) -> Self
    where
        T: Reflect,
        F: Fn(Args) -> ReflectResult<T> + Send + Sync + 'static,
    {
        Self {
            target: TypeKey::of::<T>(),
            params: params.to_vec(),
            body: Arc::new(move |args: Args| -> ReflectResult<Value> {
                Ok(Box::new(body(args)?))
            }),
        }
    }

    /// Parameterless constructor backed by [`Default`].
    pub fn default_of<T: Reflect + Default>() -> Self {
        Self::new::<T, _>(&[], |_| Ok(T::default()))
    }

    pub fn target(&self) -> TypeKey {
        self.target
    }

    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    pub fn body(&self) -> &ConstructorFn {
        &self.body
    }

    pub fn construct(&self, args: Vec<Value>) -> ReflectResult<Value> {
        let args = Args::checked(&self.params, args)?;
        (self.body)(args)
    }
}

impl Debug for ConstructorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("target", &self.target)
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast;

    #[test]
    fn constructs_from_checked_arguments() {
        let repeat = ConstructorInfo::new(&[TypeKey::of::<usize>()], |mut args| {
            Ok("x".repeat(args.take::<usize>(0)?))
        });

        assert_eq!(repeat.target(), TypeKey::of::<String>());
        let text = repeat.construct(vec![Box::new(3usize)]).unwrap();
        assert_eq!(cast::<String>(text).unwrap(), "xxx");
        assert!(repeat.construct(vec![Box::new(3u8)]).is_err());

        let empty = ConstructorInfo::default_of::<Vec<u8>>().construct(Vec::new()).unwrap();
        assert!(cast::<Vec<u8>>(empty).unwrap().is_empty());
    }
}

use std::{fmt::Debug, sync::Arc};

use crate::{Reflect, ReflectResult, TypeKey, Value};

use super::{Args, args::receiver_mut};

pub type MethodFn = Arc<dyn Fn(Option<&mut dyn Reflect>, Args) -> ReflectResult<Value> + Send + Sync>;

/// Registered method. Overloads share a name and differ by parameter types.
#[derive(Clone)]
pub struct MethodInfo {
    name: String,
    params: Vec<TypeKey>,
    returns: TypeKey,
    is_static: bool,
    body: MethodFn,
}

impl MethodInfo {
    pub fn instance<T, R, F>(name: impl Into<String>, params: &[TypeKey], body: F) -> Self
    where
        T: Reflect,
        R: Reflect,
        F: Fn(&mut T, Args) -> ReflectResult<R> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: params.to_vec(),
            returns: TypeKey::of::<R>(),
            is_static: false,
            body: Arc::new(move |target: Option<&mut dyn Reflect>, args: Args| -> ReflectResult<Value> {
                let target = receiver_mut::<T>(target)?;
                Ok(Box::new(body(target, args)?))
            }),
        }
    }

    pub fn static_<R, F>(name: impl Into<String>, params: &[TypeKey], body: F) -> Self
    where
        R: Reflect,
        F: Fn(Args) -> ReflectResult<R> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: params.to_vec(),
            returns: TypeKey::of::<R>(),
            is_static: true,
            body: Arc::new(move |_: Option<&mut dyn Reflect>, args: Args| -> ReflectResult<Value> {
                Ok(Box::new(body(args)?))
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    pub fn returns(&self) -> TypeKey {
        self.returns
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn body(&self) -> &MethodFn {
        &self.body
    }

    /// Call the method directly, checking `args` against its parameters first.
    pub fn invoke(&self, receiver: Option<&mut dyn Reflect>, args: Vec<Value>) -> ReflectResult<Value> {
        let args = Args::checked(&self.params, args)?;
        (self.body)(receiver, args)
    }
}

impl Debug for MethodInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("is_static", &self.is_static)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cast, ReflectError};

    #[test]
    fn instance_method_mutates_receiver() {
        let push = MethodInfo::instance("push_str", &[TypeKey::of::<String>()], |s: &mut String, mut args: Args| {
            s.push_str(&args.take::<String>(0)?);
            Ok(s.len())
        });

        let mut text = String::from("ab");
        let len = push.invoke(Some(&mut text), vec![Box::new(String::from("cd"))]).unwrap();
        assert_eq!(cast::<usize>(len).unwrap(), 4);
        assert_eq!(text, "abcd");

        let err = push.invoke(None, vec![Box::new(String::new())]).unwrap_err();
        assert!(matches!(err, ReflectError::MissingReceiver(_)));
    }

    #[test]
    fn static_method_checks_arguments() {
        let add = MethodInfo::static_("add", &[TypeKey::of::<i32>(), TypeKey::of::<i32>()], |mut args: Args| {
            Ok(args.take::<i32>(0)? + args.take::<i32>(1)?)
        });

        let sum = add.invoke(None, vec![Box::new(2i32), Box::new(3i32)]).unwrap();
        assert_eq!(cast::<i32>(sum).unwrap(), 5);
        assert!(add.invoke(None, vec![Box::new(2i32)]).is_err());
        assert_eq!(add.returns(), TypeKey::of::<i32>());
    }
}

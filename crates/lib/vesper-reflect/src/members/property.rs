use std::{fmt::Debug, sync::Arc};

use crate::{Reflect, ReflectError, ReflectResult, TypeKey, Value, cast};

use super::args::{receiver, receiver_mut};

pub type PropertyGetFn = Arc<dyn Fn(Option<&dyn Reflect>) -> ReflectResult<Value> + Send + Sync>;
pub type PropertySetFn = Arc<dyn Fn(Option<&mut dyn Reflect>, Value) -> ReflectResult<()> + Send + Sync>;

/// Registered property: a named value read and written through accessor closures.
///
/// Instance accessors receive the receiver, static accessors receive `None`.
#[derive(Clone)]
pub struct PropertyInfo {
    name: String,
    ty: TypeKey,
    is_static: bool,
    getter: Option<PropertyGetFn>,
    setter: Option<PropertySetFn>,
}

impl PropertyInfo {
    pub fn read_only<T, V, G>(name: impl Into<String>, get: G) -> Self
    where
        T: Reflect,
        V: Reflect,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            ty: TypeKey::of::<V>(),
            is_static: false,
            getter: Some(instance_getter(get)),
            setter: None,
        }
    }

    pub fn read_write<T, V, G, S>(name: impl Into<String>, get: G, set: S) -> Self
    where
        T: Reflect,
        V: Reflect,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            setter: Some(instance_setter(set)),
            ..Self::read_only::<T, V, G>(name, get)
        }
    }

    pub fn write_only<T, V, S>(name: impl Into<String>, set: S) -> Self
    where
        T: Reflect,
        V: Reflect,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            ty: TypeKey::of::<V>(),
            is_static: false,
            getter: None,
            setter: Some(instance_setter(set)),
        }
    }

    pub fn static_read_only<V, G>(name: impl Into<String>, get: G) -> Self
    where
        V: Reflect,
        G: Fn() -> V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            ty: TypeKey::of::<V>(),
            is_static: true,
            getter: Some(Arc::new(move |_: Option<&dyn Reflect>| -> ReflectResult<Value> {
                Ok(Box::new(get()))
            })),
            setter: None,
        }
    }

    pub fn static_read_write<V, G, S>(name: impl Into<String>, get: G, set: S) -> Self
    where
        V: Reflect,
        G: Fn() -> V + Send + Sync + 'static,
        S: Fn(V) + Send + Sync + 'static,
    {
        Self {
            setter: Some(Arc::new(move |_: Option<&mut dyn Reflect>, value: Value| -> ReflectResult<()> {
                set(cast::<V>(value)?);
                Ok(())
            })),
            ..Self::static_read_only::<V, G>(name, get)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    pub fn getter(&self) -> Option<&PropertyGetFn> {
        self.getter.as_ref()
    }

    pub fn setter(&self) -> Option<&PropertySetFn> {
        self.setter.as_ref()
    }

    /// Read the property directly, bypassing any cache.
    pub fn get(&self, receiver: Option<&dyn Reflect>) -> ReflectResult<Value> {
        let getter = self.getter.as_ref()
            .ok_or_else(|| ReflectError::unsupported(&self.name, "read"))?;
        getter(receiver)
    }

    /// Write the property directly, bypassing any cache.
    pub fn set(&self, receiver: Option<&mut dyn Reflect>, value: Value) -> ReflectResult<()> {
        let setter = self.setter.as_ref()
            .ok_or_else(|| ReflectError::unsupported(&self.name, "written"))?;
        setter(receiver, value)
    }
}

impl Debug for PropertyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("type", &self.ty)
            .field("is_static", &self.is_static)
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish()
    }
}

fn instance_getter<T, V, G>(get: G) -> PropertyGetFn
where
    T: Reflect,
    V: Reflect,
    G: Fn(&T) -> V + Send + Sync + 'static,
{
    Arc::new(move |target: Option<&dyn Reflect>| -> ReflectResult<Value> {
        let target = receiver::<T>(target)?;
        Ok(Box::new(get(target)))
    })
}

fn instance_setter<T, V, S>(set: S) -> PropertySetFn
where
    T: Reflect,
    V: Reflect,
    S: Fn(&mut T, V) + Send + Sync + 'static,
{
    Arc::new(move |target: Option<&mut dyn Reflect>, value: Value| -> ReflectResult<()> {
        let value = cast::<V>(value)?;
        set(receiver_mut::<T>(target)?, value);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn instance_property_reads_and_writes() {
        let property = PropertyInfo::read_write::<String, usize, _, _>(
            "len",
            |s: &String| s.len(),
            |s: &mut String, len: usize| s.truncate(len),
        );

        let mut text = String::from("hello");
        let len = property.get(Some(&text)).unwrap();
        assert_eq!(cast::<usize>(len).unwrap(), 5);

        property.set(Some(&mut text), Box::new(2usize)).unwrap();
        assert_eq!(text, "he");

        let err = property.set(Some(&mut text), Box::new(2u8)).unwrap_err();
        assert!(matches!(err, ReflectError::IncompatibleArgument { .. }));
    }

    #[test]
    fn accessors_are_optional() {
        let property = PropertyInfo::read_only::<String, bool, _>("is_empty", |s: &String| s.is_empty());
        assert!(property.can_read());
        assert!(!property.can_write());

        let mut text = String::new();
        let err = property.set(Some(&mut text), Box::new(true)).unwrap_err();
        assert!(matches!(err, ReflectError::Unsupported { .. }));
    }

    #[test]
    fn static_property_needs_no_receiver() {
        static LIMIT: AtomicU32 = AtomicU32::new(8);

        let property = PropertyInfo::static_read_write(
            "limit",
            || LIMIT.load(Ordering::SeqCst),
            |value: u32| LIMIT.store(value, Ordering::SeqCst),
        );

        assert!(property.is_static());
        property.set(None, Box::new(16u32)).unwrap();
        assert_eq!(cast::<u32>(property.get(None).unwrap()).unwrap(), 16);
    }
}

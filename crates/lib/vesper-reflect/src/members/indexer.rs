use std::{fmt::Debug, sync::Arc};

use crate::{Reflect, ReflectError, ReflectResult, TypeKey, Value, cast};

use super::{Args, args::{receiver, receiver_mut}};

pub type IndexGetFn = Arc<dyn Fn(&dyn Reflect, Args) -> ReflectResult<Value> + Send + Sync>;
pub type IndexSetFn = Arc<dyn Fn(&mut dyn Reflect, Args, Value) -> ReflectResult<()> + Send + Sync>;

/// Registered indexer: an instance accessor keyed by one or more index arguments.
#[derive(Clone)]
pub struct IndexerInfo {
    target: TypeKey,
    params: Vec<TypeKey>,
    value: TypeKey,
    getter: Option<IndexGetFn>,
    setter: Option<IndexSetFn>,
}

impl IndexerInfo {
    pub fn read_only<T, V, G>(params: &[TypeKey], get: G) -> Self
    where
        T: Reflect,
        V: Reflect,
        G: Fn(&T, Args) -> ReflectResult<V> + Send + Sync + 'static,
    {
        Self {
            target: TypeKey::of::<T>(),
            params: params.to_vec(),
            value: TypeKey::of::<V>(),
            getter: Some(Arc::new(move |target: &dyn Reflect, args: Args| -> ReflectResult<Value> {
                let target = receiver::<T>(Some(target))?;
                Ok(Box::new(get(target, args)?))
            })),
            setter: None,
        }
    }

    pub fn read_write<T, V, G, S>(params: &[TypeKey], get: G, set: S) -> Self
    where
        T: Reflect,
        V: Reflect,
        G: Fn(&T, Args) -> ReflectResult<V> + Send + Sync + 'static,
        S: Fn(&mut T, Args, V) -> ReflectResult<()> + Send + Sync + 'static,
    {
        Self {
            setter: Some(Arc::new(move |target: &mut dyn Reflect, args: Args, value: Value| -> ReflectResult<()> {
                let value = cast::<V>(value)?;
                set(receiver_mut::<T>(Some(target))?, args, value)
            })),
            ..Self::read_only::<T, V, G>(params, get)
        }
    }

    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// Index parameter types.
    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    /// Type of the indexed value.
    pub fn value_type(&self) -> TypeKey {
        self.value
    }

    /// Signature of the setter: the index parameters followed by the value.
    pub fn setter_params(&self) -> Vec<TypeKey> {
        let mut params = self.params.clone();
        params.push(self.value);
        params
    }

    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    pub fn getter(&self) -> Option<&IndexGetFn> {
        self.getter.as_ref()
    }

    pub fn setter(&self) -> Option<&IndexSetFn> {
        self.setter.as_ref()
    }

    pub fn get(&self, target: &dyn Reflect, args: Vec<Value>) -> ReflectResult<Value> {
        let getter = self.getter.as_ref()
            .ok_or_else(|| ReflectError::unsupported(self.describe(), "read"))?;
        getter(target, Args::checked(&self.params, args)?)
    }

    pub fn set(&self, target: &mut dyn Reflect, args: Vec<Value>, value: Value) -> ReflectResult<()> {
        let setter = self.setter.as_ref()
            .ok_or_else(|| ReflectError::unsupported(self.describe(), "written"))?;
        setter(target, Args::checked(&self.params, args)?, value)
    }

    fn describe(&self) -> String {
        format!("{}[{:?}]", self.target.short_name(), self.params)
    }
}

impl Debug for IndexerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexerInfo")
            .field("target", &self.target)
            .field("params", &self.params)
            .field("value", &self.value)
            .field("can_write", &self.can_write())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_indexer() -> IndexerInfo {
        IndexerInfo::read_write(
            &[TypeKey::of::<usize>()],
            |s: &String, mut args: Args| {
                let index = args.take::<usize>(0)?;
                s.chars().nth(index).ok_or(ReflectError::IndexOutOfBounds { index, len: s.len() })
            },
            |s: &mut String, mut args: Args, c: char| {
                let index = args.take::<usize>(0)?;
                s.replace_range(index..index + 1, &c.to_string());
                Ok(())
            },
        )
    }

    #[test]
    fn indexer_reads_and_writes() {
        let indexer = char_indexer();
        let mut text = String::from("cat");

        let c = indexer.get(&text, vec![Box::new(1usize)]).unwrap();
        assert_eq!(cast::<char>(c).unwrap(), 'a');

        indexer.set(&mut text, vec![Box::new(0usize)], Box::new('b')).unwrap();
        assert_eq!(text, "bat");

        assert_eq!(indexer.setter_params(), vec![TypeKey::of::<usize>(), TypeKey::of::<char>()]);
    }

    #[test]
    fn indexer_rejects_wrong_receiver() {
        let indexer = char_indexer();
        let err = indexer.get(&5u8, vec![Box::new(0usize)]).unwrap_err();
        assert!(matches!(err, ReflectError::IncompatibleArgument { .. }));
    }
}

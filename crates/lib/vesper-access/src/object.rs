use std::{fmt::Debug, sync::Arc};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use vesper_reflect::{Reflect, TypeKey, Value};

/// Shared handle to an instance of a reference-semantics type.
///
/// Clones share identity: a write through one clone is seen through all of them.
#[derive(Clone)]
pub struct ObjectRef {
    inner: Arc<RwLock<Value>>,
}

impl ObjectRef {
    pub fn new<T: Reflect>(value: T) -> Self {
        Self::from_value(Box::new(value))
    }

    pub fn from_value(value: Value) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Runtime type of the referenced instance.
    pub fn type_key(&self) -> TypeKey {
        TypeKey::of_value(&**self.inner.read())
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Value> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Value> {
        self.inner.write()
    }

    /// Run `f` on the instance if it is a `T`.
    pub fn with<T: Reflect, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.read().downcast_ref::<T>().map(f)
    }

    pub fn with_mut<T: Reflect, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.inner.write().downcast_mut::<T>().map(f)
    }

    /// Whether both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ObjectRef")
            .field(&*self.inner.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let object = ObjectRef::new(String::from("a"));
        let alias = object.clone();

        alias.with_mut(|s: &mut String| s.push('b')).unwrap();
        assert_eq!(object.with(|s: &String| s.clone()).unwrap(), "ab");
        assert!(object.ptr_eq(&alias));
        assert!(!object.ptr_eq(&ObjectRef::new(String::from("ab"))));
        assert_eq!(object.type_key(), TypeKey::of::<String>());
        assert!(object.with(|_: &u8| ()).is_none());
    }
}

use std::{fmt::Debug, sync::Arc};

use parking_lot::RwLock;

use crate::{Reflect, ReflectResult, TypeKey, Value};

/// Registered static field: one value slot shared by every clone of the registration.
#[derive(Clone)]
pub struct StaticFieldInfo {
    name: String,
    ty: TypeKey,
    slot: Arc<RwLock<Value>>,
}

impl StaticFieldInfo {
    pub fn new<V: Reflect>(name: impl Into<String>, initial: V) -> Self {
        Self {
            name: name.into(),
            ty: TypeKey::of::<V>(),
            slot: Arc::new(RwLock::new(Box::new(initial))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    /// Copy of the current value.
    pub fn get(&self) -> Value {
        self.slot.read().clone_value()
    }

    /// Replace the current value. The slot is left untouched on a type mismatch.
    pub fn set(&self, value: Value) -> ReflectResult<()> {
        self.slot.write().set(value)
    }
}

impl Debug for StaticFieldInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticFieldInfo")
            .field("name", &self.name)
            .field("value", &*self.slot.read())
            .finish()
    }
}

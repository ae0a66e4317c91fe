use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::TypeRegistry;

/// A cheaply clonable, thread safe handle to one [`TypeRegistry`].
///
/// Every clone sees members registered through any other clone.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal.write()
    }
}

impl From<TypeRegistry> for TypeRegistryArc {
    fn from(registry: TypeRegistry) -> Self {
        Self::new(registry)
    }
}

impl std::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistryArc")
            .field("types", &self.read().len())
            .finish()
    }
}

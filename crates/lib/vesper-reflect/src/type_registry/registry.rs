use std::{collections::HashMap, any::TypeId, path::PathBuf, time::Duration};

use crate::{members::Members, Semantics, TypeInfo, TypeKey};

use super::{TypeRegistration, GetTypeRegistration};

/// Registry for all reflected types.
pub struct TypeRegistry {
    registrations: HashMap<TypeId, TypeRegistration>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a new empty type registry.
    pub fn empty() -> Self {
        Self {
            registrations: Default::default(),
        }
    }

    /// Create a type registry with default registrations for primitive types.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<char>();
        registry.register::<bool>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<PathBuf>();
        registry.register::<Duration>();
        registry
    }

    /// Register `T`. Registering the same type twice keeps the first registration
    /// and every member already added to it.
    pub fn register<T: GetTypeRegistration>(&mut self) {
        self.add_registration(T::get_type_registration());
    }

    pub fn add_registration(&mut self, registration: TypeRegistration) {
        if self.registrations.contains_key(&registration.type_id()) {
            return;
        }

        glog::debug!("registered reflected type `{}`", registration.type_name());
        self.registrations.insert(registration.type_id(), registration);
    }

    /// Register a list or array type known only through its [`TypeInfo`],
    /// e.g. the runtime type of a receiver. Such types get value semantics.
    ///
    /// Returns false for any other kind of type, which must go through [`TypeRegistry::register`].
    pub fn register_container(&mut self, type_info: &'static TypeInfo) -> bool {
        if type_info.item_type().is_none() {
            return false;
        }

        self.add_registration(TypeRegistration::of_container(type_info));
        true
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.registrations.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Get type registration for certain type id immutably.
    pub fn registration(&self, type_id: TypeId) -> Option<&TypeRegistration> {
        self.registrations.get(&type_id)
    }

    /// Get type registration for certain type id mutably.
    pub fn registration_mut(&mut self, type_id: TypeId) -> Option<&mut TypeRegistration> {
        self.registrations.get_mut(&type_id)
    }

    pub fn registration_of(&self, key: TypeKey) -> Option<&TypeRegistration> {
        self.registration(key.id())
    }

    /// Members of `T`, registering `T` first if needed.
    pub fn members_mut<T: GetTypeRegistration + 'static>(&mut self) -> &mut Members {
        let type_id = TypeId::of::<T>();
        if !self.contains(type_id) {
            self.register::<T>();
        }

        self.registrations
            .entry(type_id)
            .or_insert_with(T::get_type_registration)
            .members_mut()
    }

    /// Override the value or reference semantics of `T`, registering `T` first if needed.
    pub fn set_semantics<T: GetTypeRegistration + 'static>(&mut self, semantics: Semantics) {
        let type_id = TypeId::of::<T>();
        if !self.contains(type_id) {
            self.register::<T>();
        }

        if let Some(registration) = self.registration_mut(type_id) {
            registration.set_semantics(semantics);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRegistration> {
        self.registrations.values()
    }
}

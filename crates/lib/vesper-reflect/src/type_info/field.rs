use std::any::TypeId;

use crate::{Reflect, TypeKey};

/// Named filed of a reflected struct.
#[derive(Clone, Debug)]
pub struct NamedField {
    /// Field name shown in the code.
    name: &'static str,
    ty: TypeKey,
    /// Position among the reflected fields.
    index: usize,
}

impl NamedField {
    pub fn new<T: Reflect>(field_name: &'static str, index: usize) -> Self {
        Self {
            name: field_name,
            ty: TypeKey::of::<T>(),
            index,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    pub fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    /// Check if this field type matches the given type.
    pub fn is<T: std::any::Any>(&self) -> bool {
        self.ty.is::<T>()
    }
}

/// Unnamed filed of a reflected tuple struct.
#[derive(Clone, Debug)]
pub struct UnnamedField {
    ty: TypeKey,
    /// Position among the reflected fields.
    index: usize,
    /// Subscript of the field in the declaration, ignored fields included.
    position: usize,
}

impl UnnamedField {
    pub fn new<T: Reflect>(index: usize, position: usize) -> Self {
        Self {
            ty: TypeKey::of::<T>(),
            index,
            position,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The `N` of `self.N`.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    pub fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    pub fn is<T: std::any::Any>(&self) -> bool {
        self.ty.is::<T>()
    }
}

/// Convenience helper trait for user to get the field data of a struct.
///
/// GetField will do fetching and downcasting for you.
pub trait GetField {
    /// Get a field of struct by name immutably.
    fn get_field<R: Reflect>(&self, name: &str) -> Option<&R>;

    /// Get a field of struct by name mutably.
    fn get_field_mut<R: Reflect>(&mut self, name: &str) -> Option<&mut R>;
}

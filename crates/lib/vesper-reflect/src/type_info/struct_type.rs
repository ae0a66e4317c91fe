use std::{any::TypeId, collections::HashMap, slice::Iter};

use crate::{Reflect, TypeKey};

use super::field::{NamedField, GetField};

/// Struct and unit struct that can be reflected at compile time.
pub trait Struct: Reflect {
    /// Get a field of the struct by name immutably.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Get a field of the struct by name mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Get a field of the struct by index immutably.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Get a field of the struct by index mutably.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Return the number of fields.
    fn num_fields(&self) -> usize;

    /// Get the name of field by index.
    fn field_name_at(&self, index: usize) -> Option<&str>;

    /// Return an iterator to iterate over every reflected fields.
    fn iter(&self) -> StructFieldIter<'_>;
}

pub struct StructFieldIter<'a> {
    refl_struct: &'a dyn Struct,
    curr_index: usize,
}

impl<'a> StructFieldIter<'a> {
    pub fn new(refl_struct: &'a dyn Struct) -> Self {
        Self {
            refl_struct,
            curr_index: 0,
        }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = &'a dyn Reflect;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.refl_struct.field_at(self.curr_index);
        self.curr_index += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.refl_struct.num_fields().saturating_sub(self.curr_index);
        (remaining, Some(remaining))
    }
}

impl<T: Struct> GetField for T {
    fn get_field<R: Reflect>(&self, name: &str) -> Option<&R> {
        self.field(name)
            .and_then(|field| field.downcast_ref::<R>())
    }

    fn get_field_mut<R: Reflect>(&mut self, name: &str) -> Option<&mut R> {
        self.field_mut(name)
            .and_then(|field| field.downcast_mut::<R>())
    }
}

impl GetField for dyn Struct {
    fn get_field<R: Reflect>(&self, name: &str) -> Option<&R> {
        self.field(name)
            .and_then(|field| field.downcast_ref::<R>())
    }

    fn get_field_mut<R: Reflect>(&mut self, name: &str) -> Option<&mut R> {
        self.field_mut(name)
            .and_then(|field| field.downcast_mut::<R>())
    }
}

/// Storage container of struct type.
#[derive(Debug, Clone)]
pub struct StructTypeInfo {
    /// Name of the struct.
    name: &'static str,
    ty: TypeKey,
    /// Runtime heap allocated fixed-size array of fields.
    fields: Box<[NamedField]>,
    /// Runtime heap allocated fixed-size array of field' name.
    field_names: Box<[&'static str]>,
    /// For fast backward search.
    field_indices: HashMap<&'static str, usize>,
}

impl StructTypeInfo {
    pub fn new<T: Reflect>(struct_name: &'static str, fields: &[NamedField]) -> Self {
        let field_names = fields.iter()
            .map(|field| field.name())
            .collect();

        let field_indices = fields.iter().enumerate()
            .map(|(idx, field)| (field.name(), idx))
            .collect();

        Self {
            name: struct_name,
            ty: TypeKey::of::<T>(),
            fields: fields.to_vec().into_boxed_slice(),
            field_names,
            field_indices,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
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

    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.field_indices.get(name)
            .and_then(|idx| self.fields.get(*idx))
    }

    pub fn field_names(&self) -> &[&'static str] {
        &self.field_names
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn index_of(&self, field_name: &str) -> Option<usize> {
        self.field_indices.get(field_name).copied()
    }

    pub fn iter(&self) -> Iter<'_, NamedField> {
        self.fields.iter()
    }
}

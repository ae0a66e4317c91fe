use std::{any::TypeId, slice::Iter};

use crate::{Reflect, TypeKey};

use super::field::UnnamedField;

/// Tuple struct (e.g. `struct Meters(f32);`) that can be reflected at compile time.
pub trait TupleStruct: Reflect {
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn num_fields(&self) -> usize;

    fn iter(&self) -> TupleStructFieldIter<'_>;
}

pub struct TupleStructFieldIter<'a> {
    refl_tuple_struct: &'a dyn TupleStruct,
    curr_index: usize,
}

impl<'a> TupleStructFieldIter<'a> {
    pub fn new(refl_tuple_struct: &'a dyn TupleStruct) -> Self {
        Self {
            refl_tuple_struct,
            curr_index: 0,
        }
    }
}

impl<'a> Iterator for TupleStructFieldIter<'a> {
    type Item = &'a dyn Reflect;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.refl_tuple_struct.field_at(self.curr_index);
        self.curr_index += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.refl_tuple_struct.num_fields().saturating_sub(self.curr_index);
        (remaining, Some(remaining))
    }
}

/// Storage container of tuple struct type.
#[derive(Debug, Clone)]
pub struct TupleStructTypeInfo {
    name: &'static str,
    ty: TypeKey,
    fields: Box<[UnnamedField]>,
}

impl TupleStructTypeInfo {
    pub fn new<T: Reflect>(name: &'static str, fields: &[UnnamedField]) -> Self {
        Self {
            name,
            ty: TypeKey::of::<T>(),
            fields: fields.to_vec().into_boxed_slice(),
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

    pub fn field_at(&self, index: usize) -> Option<&UnnamedField> {
        self.fields.get(index)
    }

    /// Field declared as `self.position`. `None` if it is ignored or out of range.
    pub fn field_at_position(&self, position: usize) -> Option<&UnnamedField> {
        self.fields.iter().find(|field| field.position() == position)
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> Iter<'_, UnnamedField> {
        self.fields.iter()
    }
}

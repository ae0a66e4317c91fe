use std::any::TypeId;

use crate::{Reflect, TypeKey};

/// Compile-time known-sized array that can be reflected at compile time.
pub trait Array: Reflect {
    /// Return array element immutably by index, `None` if index is out of bounds.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Return array element mutably by index, `None` if index is out of bounds.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Return the length of the array.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all elements in the array.
    fn iter(&self) -> ArrayIter<'_>;
}

pub struct ArrayIter<'a> {
    refl_array: &'a dyn Array,
    curr_index: usize,
}

impl<'a> ArrayIter<'a> {
    pub fn new(refl_array: &'a dyn Array) -> Self {
        Self {
            refl_array,
            curr_index: 0,
        }
    }
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.refl_array.get(self.curr_index);
        self.curr_index += 1;
        item
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.refl_array.len().saturating_sub(self.curr_index);
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for ArrayIter<'a> {}

/// Storage container of array type.
#[derive(Debug, Clone)]
pub struct ArrayTypeInfo {
    ty: TypeKey,
    item_ty: TypeKey,
    capacity: usize,
}

impl ArrayTypeInfo {
    pub fn new<T: Array, I: Reflect>(capacity: usize) -> Self {
        Self {
            ty: TypeKey::of::<T>(),
            item_ty: TypeKey::of::<I>(),
            capacity,
        }
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

    pub fn item_type(&self) -> TypeKey {
        self.item_ty
    }

    /// Check if this element type matches the given type.
    pub fn item_is<T: std::any::Any>(&self) -> bool {
        self.item_ty.is::<T>()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

use std::any::{TypeId, Any};

use crate::{Reflect, TypeKey};

use super::array_type::Array;

/// An random access runtime array type, corresponding to [`Vec`] in Rust.
///
/// Elements are read and written in place through [`Array`]. The length
/// is whatever the list currently holds.
pub trait List: Array {
    fn as_array(&self) -> &dyn Array;
}

/// Storage container of list type.
/// (list is a runtime array)
#[derive(Clone, Debug)]
pub struct ListTypeInfo {
    ty: TypeKey,
    item_ty: TypeKey,
}

impl ListTypeInfo {
    pub fn new<T: List, Item: Reflect>() -> Self {
        Self {
            ty: TypeKey::of::<T>(),
            item_ty: TypeKey::of::<Item>(),
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

    pub fn is<T: Any>(&self) -> bool {
        self.ty.is::<T>()
    }

    pub fn item_type(&self) -> TypeKey {
        self.item_ty
    }

    pub fn item_is<T: Any>(&self) -> bool {
        self.item_ty.is::<T>()
    }
}

use std::any::TypeId;

use crate::{Reflect, TypeKey};

/// Storage container of rust primitive type.
///
/// Primitive types are opaque to reflection: a [`bool`] can not be broken
/// down any further, and neither can a [`String`] as far as the user is concerned.
#[derive(Debug, Clone)]
pub struct PrimitiveTypeInfo {
    ty: TypeKey,
}

impl PrimitiveTypeInfo {
    pub fn new<T: Reflect + ?Sized>() -> Self {
        Self {
            ty: TypeKey::of::<T>(),
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

    pub fn is<T: std::any::Any>(&self) -> bool {
        self.ty.is::<T>()
    }
}

use std::any::TypeId;

mod field;
mod primitive_type;
mod struct_type;
mod tuple_struct_type;
mod array_type;
mod list_type;

pub use field::{NamedField, UnnamedField, GetField};
pub use primitive_type::PrimitiveTypeInfo;
pub use struct_type::{Struct, StructTypeInfo, StructFieldIter};
pub use tuple_struct_type::{TupleStruct, TupleStructTypeInfo, TupleStructFieldIter};
pub use array_type::{Array, ArrayTypeInfo, ArrayIter};
pub use list_type::{List, ListTypeInfo};

use crate::TypeKey;

/// How instances of a type behave when they pass through a type-erased interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Semantics {
    /// Instances are moved or copied. In-place mutation needs an explicit holder.
    #[default]
    Value,
    /// Instances live behind a shared handle and are mutated through it.
    Reference,
}

/// Type that has been reflected and can fetch type information.
pub trait Typed {
    fn type_info() -> &'static TypeInfo;

    fn semantics() -> Semantics {
        Semantics::Value
    }
}

#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructTypeInfo),
    TupleStruct(TupleStructTypeInfo),
    Array(ArrayTypeInfo),
    List(ListTypeInfo),
    Primitive(PrimitiveTypeInfo),
}

impl TypeInfo {
    pub fn type_id(&self) -> TypeId {
        match &self {
            Self::Struct(ty) => ty.type_id(),
            Self::TupleStruct(ty) => ty.type_id(),
            Self::Array(ty) => ty.type_id(),
            Self::List(ty) => ty.type_id(),
            Self::Primitive(ty) => ty.type_id(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match &self {
            Self::Struct(ty) => ty.type_name(),
            Self::TupleStruct(ty) => ty.type_name(),
            Self::Array(ty) => ty.type_name(),
            Self::List(ty) => ty.type_name(),
            Self::Primitive(ty) => ty.type_name(),
        }
    }

    pub fn type_key(&self) -> TypeKey {
        match &self {
            Self::Struct(ty) => ty.type_key(),
            Self::TupleStruct(ty) => ty.type_key(),
            Self::Array(ty) => ty.type_key(),
            Self::List(ty) => ty.type_key(),
            Self::Primitive(ty) => ty.type_key(),
        }
    }

    pub fn is<T: std::any::Any>(&self) -> bool {
        TypeId::of::<T>() == self.type_id()
    }

    /// Element type, for arrays and lists.
    pub fn item_type(&self) -> Option<TypeKey> {
        match &self {
            Self::Array(ty) => Some(ty.item_type()),
            Self::List(ty) => Some(ty.item_type()),
            _ => None,
        }
    }
}

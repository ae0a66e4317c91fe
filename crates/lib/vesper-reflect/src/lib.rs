extern crate log as glog;

// let the derive macro resolve `vesper_reflect` paths inside this crate too.
extern crate self as vesper_reflect;

mod error;
mod type_key;
mod type_info_cell;

mod reflect;

mod impls;
mod special_traits;

pub mod type_info;
pub mod type_registry;
pub mod members;

pub use error::{ReflectError, ReflectResult};
pub use type_key::TypeKey;
pub use reflect::{Reflect, ReflectRef, ReflectMut, Value, cast};

pub use type_info_cell::*;
pub use type_info::{
    TypeInfo, Typed, Semantics,
    Struct, TupleStruct, Array, List,
    NamedField, UnnamedField,
};
pub use type_registry::{TypeRegistry, TypeRegistryArc, TypeRegistration, GetTypeRegistration};
pub use members::{
    Members, Args,
    PropertyInfo, MethodInfo, ConstructorInfo, IndexerInfo, StaticFieldInfo,
};

pub use vesper_reflect_derive::Reflect;

#[doc(hidden)]
pub mod __private {
    pub use crate::reflect::set_concrete;
}

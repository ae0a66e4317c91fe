use std::{any::TypeId, fmt::Debug};

use downcast_rs::{DowncastSync, impl_downcast};

use crate::{
    type_info::{Struct, TupleStruct, Array, List, PrimitiveTypeInfo},
    TypeInfo, Typed, NonGenericTypeInfoOnceCell, ReflectError, ReflectResult, TypeKey,
    special_traits::debug,
};

/// Loosely-typed reflected value.
///
/// Every dynamic read hands one of these back, the caller narrows it with [`cast`].
pub type Value = Box<dyn Reflect>;

/// Wrapper enum to get a immutable reference of reflected data conveniently.
/// This helper class classify reflected data for user.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    TupleStruct(&'a dyn TupleStruct),
    Array(&'a dyn Array),
    List(&'a dyn List),
    Primitive(&'a dyn Reflect),
}

/// Wrapper enum to get a mutable reference of reflected data conveniently.
/// This helper class classify reflected data for user.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    TupleStruct(&'a mut dyn TupleStruct),
    Array(&'a mut dyn Array),
    List(&'a mut dyn List),
    Primitive(&'a mut dyn Reflect),
}

pub trait Reflect: DowncastSync {
    fn type_name(&self) -> &'static str;

    fn get_type_info(&self) -> &'static TypeInfo;

    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;
    fn as_reflect(&self) -> &dyn Reflect;
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    fn reflect_ref(&self) -> ReflectRef<'_>;
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Overwrite `self` with `value`.
    ///
    /// Fails with [`ReflectError::IncompatibleArgument`] and leaves `self`
    /// untouched if `value` is not of the same concrete type.
    fn set(&mut self, value: Value) -> ReflectResult<()>;

    /// Clones the value as a `Reflect` trait object.
    fn clone_value(&self) -> Value;

    /// Debug formatter for the value.
    ///
    /// Any value that is not an implementor of other `Reflect` subtraits
    /// (e.g. [`List`], [`Struct`]), will default to the format: `"Reflect(type_name)"`,
    /// where `type_name` is the [type name] of the underlying type.
    ///
    /// [type name]: Self::type_name
    fn debug(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Struct(dyn_struct) => debug::struct_debug(dyn_struct, f),
            ReflectRef::TupleStruct(dyn_tuple_struct) => debug::tuple_struct_debug(dyn_tuple_struct, f),
            ReflectRef::Array(dyn_array) => debug::array_debug(dyn_array, f),
            ReflectRef::List(dyn_list) => debug::array_debug(dyn_list.as_array(), f),
            ReflectRef::Primitive(_) => write!(f, "Reflect({})", self.type_name()),
        }
    }
}

impl_downcast!(sync Reflect);

impl Debug for dyn Reflect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.debug(f)
    }
}

impl Typed for dyn Reflect {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoOnceCell = NonGenericTypeInfoOnceCell::new();
        CELL.get_or_set(|| TypeInfo::Primitive(PrimitiveTypeInfo::new::<Self>()))
    }
}

impl dyn Reflect {
    /// Try to downcast dyn Reflect to concrete type T.
    /// If failed, return origin Box<dyn Reflect>
    pub fn take<T: Reflect>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|v| *v)
    }

    /// [`TypeId`] of the concrete value behind this trait object.
    #[inline]
    pub fn reflect_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    #[inline]
    pub fn type_key(&self) -> TypeKey {
        TypeKey::of_value(self)
    }
}

/// Narrow a loosely-typed value to `T`.
pub fn cast<T: Reflect>(value: Value) -> ReflectResult<T> {
    value.take::<T>()
        .map_err(|value| ReflectError::incompatible::<T>(value.type_name()))
}

/// Shared body of [`Reflect::set`] for every concrete type.
#[doc(hidden)]
pub fn set_concrete<T: Reflect>(target: &mut T, value: Value) -> ReflectResult<()> {
    *target = cast::<T>(value)?;
    Ok(())
}

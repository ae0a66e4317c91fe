use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use crate::{
    Reflect, ReflectRef, ReflectMut, ReflectResult, Value, Typed, TypeInfo,
    NonGenericTypeInfoOnceCell, GenericTypeInfoOnceCell,
    type_info::{Array, ArrayIter, ArrayTypeInfo, List, ListTypeInfo, PrimitiveTypeInfo},
    type_registry::{GetTypeRegistration, TypeRegistration},
    reflect::set_concrete,
};

/// Implements [`Reflect`] for opaque types we cannot derive on.
macro_rules! impl_reflect_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static TYPE_INFO_CELL: NonGenericTypeInfoOnceCell = NonGenericTypeInfoOnceCell::new();
                    TYPE_INFO_CELL.get_or_set(|| TypeInfo::Primitive(PrimitiveTypeInfo::new::<Self>()))
                }
            }

            impl GetTypeRegistration for $ty {
                fn get_type_registration() -> TypeRegistration {
                    TypeRegistration::type_of::<Self>()
                }
            }

            impl Reflect for $ty {
                #[inline]
                fn type_name(&self) -> &'static str {
                    ::core::any::type_name::<Self>()
                }

                #[inline]
                fn get_type_info(&self) -> &'static TypeInfo {
                    <Self as Typed>::type_info()
                }

                #[inline]
                fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
                    self
                }

                #[inline]
                fn as_reflect(&self) -> &dyn Reflect {
                    self
                }

                #[inline]
                fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
                    self
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Primitive(self)
                }

                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Primitive(self)
                }

                #[inline]
                fn set(&mut self, value: Value) -> ReflectResult<()> {
                    set_concrete(self, value)
                }

                #[inline]
                fn clone_value(&self) -> Value {
                    Box::new(Clone::clone(self))
                }

                fn debug(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    Debug::fmt(self, f)
                }
            }
        )*
    };
}

impl_reflect_primitive!(
    bool, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    (), String, PathBuf, Duration,
);

// Vec<T> is reflected as a List.
impl<T: Reflect + Clone> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static TYPE_INFO_CELL: GenericTypeInfoOnceCell = GenericTypeInfoOnceCell::new();
        TYPE_INFO_CELL.get_or_insert::<Self, _>(|| TypeInfo::List(ListTypeInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Clone> GetTypeRegistration for Vec<T> {
    fn get_type_registration() -> TypeRegistration {
        TypeRegistration::type_of::<Self>()
    }
}

impl<T: Reflect + Clone> Array for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn iter(&self) -> ArrayIter<'_> {
        ArrayIter::new(self)
    }
}

impl<T: Reflect + Clone> List for Vec<T> {
    fn as_array(&self) -> &dyn Array {
        self
    }
}

impl<T: Reflect + Clone> Reflect for Vec<T> {
    #[inline]
    fn type_name(&self) -> &'static str {
        ::core::any::type_name::<Self>()
    }

    #[inline]
    fn get_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
        self
    }

    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }

    #[inline]
    fn set(&mut self, value: Value) -> ReflectResult<()> {
        set_concrete(self, value)
    }

    #[inline]
    fn clone_value(&self) -> Value {
        Box::new(self.clone())
    }
}

// [T; N] is reflected as a fixed-size Array.
impl<T: Reflect + Clone, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static TYPE_INFO_CELL: GenericTypeInfoOnceCell = GenericTypeInfoOnceCell::new();
        TYPE_INFO_CELL.get_or_insert::<Self, _>(|| TypeInfo::Array(ArrayTypeInfo::new::<Self, T>(N)))
    }
}

impl<T: Reflect + Clone, const N: usize> GetTypeRegistration for [T; N] {
    fn get_type_registration() -> TypeRegistration {
        TypeRegistration::type_of::<Self>()
    }
}

impl<T: Reflect + Clone, const N: usize> Array for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn iter(&self) -> ArrayIter<'_> {
        ArrayIter::new(self)
    }
}

impl<T: Reflect + Clone, const N: usize> Reflect for [T; N] {
    #[inline]
    fn type_name(&self) -> &'static str {
        ::core::any::type_name::<Self>()
    }

    #[inline]
    fn get_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
        self
    }

    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Array(self)
    }

    #[inline]
    fn set(&mut self, value: Value) -> ReflectResult<()> {
        set_concrete(self, value)
    }

    #[inline]
    fn clone_value(&self) -> Value {
        Box::new(self.clone())
    }
}

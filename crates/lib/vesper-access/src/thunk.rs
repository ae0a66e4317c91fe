use std::{fmt, sync::Arc};

use vesper_reflect::{ReflectResult, Value};

use crate::{AccessError, Target};

/// Calling convention of a thunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `(target) -> value`
    Getter,
    /// `(target, value) -> ()`
    Setter,
    /// `(target, args) -> result`
    Invoker,
    /// `(args) -> instance`
    Constructor,
    /// `(array, index) -> value`
    ElementGetter,
    /// `(array, index, value) -> ()`
    ElementSetter,
    /// `(target, index args) -> value`
    IndexGetter,
    /// `(target, index args followed by the value) -> ()`
    IndexSetter,
}

impl Shape {
    /// Whether a thunk of this shape writes to its receiver.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Setter | Self::Invoker | Self::ElementSetter | Self::IndexSetter)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Defines one typed thunk wrapper around an `Arc<dyn Fn>`.
macro_rules! define_thunk {
    (
        $(#[$doc:meta])*
        $name:ident, $call:ident ( $($arg:ident : $arg_ty:ty),* ) -> $ret:ty
    ) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name(Arc<dyn Fn($($arg_ty),*) -> ReflectResult<$ret> + Send + Sync>);

        impl $name {
            pub fn new<F>(body: F) -> Self
            where
                F: Fn($($arg_ty),*) -> ReflectResult<$ret> + Send + Sync + 'static,
            {
                Self(Arc::new(body))
            }

            #[inline]
            pub fn $call(&self, $($arg: $arg_ty),*) -> ReflectResult<$ret> {
                (self.0)($($arg),*)
            }

            /// Whether both handles share one synthesized callable.
            pub fn ptr_eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:p})", stringify!($name), Arc::as_ptr(&self.0))
            }
        }

        impl From<$name> for Thunk {
            fn from(thunk: $name) -> Self {
                Thunk::$name(thunk)
            }
        }

        impl TryFrom<Thunk> for $name {
            type Error = AccessError;

            fn try_from(thunk: Thunk) -> Result<Self, Self::Error> {
                match thunk {
                    Thunk::$name(thunk) => Ok(thunk),
                    other => Err(AccessError::ShapeMismatch {
                        expected: Shape::$name,
                        found: other.shape(),
                    }),
                }
            }
        }
    };
}

define_thunk!(
    /// Reads a field or property.
    Getter, get(target: Target<'_>) -> Value
);
define_thunk!(
    /// Writes a field or property.
    Setter, set(target: Target<'_>, value: Value) -> ()
);
define_thunk!(
    /// Calls a method.
    Invoker, invoke(target: Target<'_>, args: Vec<Value>) -> Value
);
define_thunk!(
    /// Creates a new instance.
    Constructor, construct(args: Vec<Value>) -> Value
);
define_thunk!(
    /// Reads one element of a list or array.
    ElementGetter, get(target: Target<'_>, index: usize) -> Value
);
define_thunk!(
    /// Writes one element of a list or array.
    ElementSetter, set(target: Target<'_>, index: usize, value: Value) -> ()
);
define_thunk!(
    /// Reads through an indexer.
    IndexGetter, get(target: Target<'_>, args: Vec<Value>) -> Value
);
define_thunk!(
    /// Writes through an indexer. The value is the trailing argument.
    IndexSetter, set(target: Target<'_>, args: Vec<Value>) -> ()
);

/// A synthesized callable of any shape, as stored in the cache.
#[derive(Debug, Clone)]
pub enum Thunk {
    Getter(Getter),
    Setter(Setter),
    Invoker(Invoker),
    Constructor(Constructor),
    ElementGetter(ElementGetter),
    ElementSetter(ElementSetter),
    IndexGetter(IndexGetter),
    IndexSetter(IndexSetter),
}

impl Thunk {
    pub fn shape(&self) -> Shape {
        match self {
            Self::Getter(_) => Shape::Getter,
            Self::Setter(_) => Shape::Setter,
            Self::Invoker(_) => Shape::Invoker,
            Self::Constructor(_) => Shape::Constructor,
            Self::ElementGetter(_) => Shape::ElementGetter,
            Self::ElementSetter(_) => Shape::ElementSetter,
            Self::IndexGetter(_) => Shape::IndexGetter,
            Self::IndexSetter(_) => Shape::IndexSetter,
        }
    }

    /// Whether both thunks are the same stored callable.
    pub fn ptr_eq(&self, other: &Thunk) -> bool {
        match (self, other) {
            (Self::Getter(a), Self::Getter(b)) => a.ptr_eq(b),
            (Self::Setter(a), Self::Setter(b)) => a.ptr_eq(b),
            (Self::Invoker(a), Self::Invoker(b)) => a.ptr_eq(b),
            (Self::Constructor(a), Self::Constructor(b)) => a.ptr_eq(b),
            (Self::ElementGetter(a), Self::ElementGetter(b)) => a.ptr_eq(b),
            (Self::ElementSetter(a), Self::ElementSetter(b)) => a.ptr_eq(b),
            (Self::IndexGetter(a), Self::IndexGetter(b)) => a.ptr_eq(b),
            (Self::IndexSetter(a), Self::IndexSetter(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

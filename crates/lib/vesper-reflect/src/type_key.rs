use std::{any::TypeId, fmt, hash::{Hash, Hasher}};

use crate::{Reflect, type_info_cell};

/// Identity of a type: its [`TypeId`] plus the type name for diagnostics.
///
/// Equality and hashing only look at the [`TypeId`].
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Key of a parameter that accepts any reflected value.
    pub fn any() -> Self {
        Self::of::<dyn Reflect>()
    }

    /// Runtime type of a reflected value.
    pub fn of_value(value: &dyn Reflect) -> Self {
        Self {
            id: value.as_any().type_id(),
            name: value.type_name(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn short_name(&self) -> String {
        type_info_cell::get_type_collapsed_name(self.name)
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        self.is::<dyn Reflect>()
    }

    /// Whether a value of type `supplied` may be passed where `self` is declared.
    #[inline]
    pub fn accepts(&self, supplied: &TypeKey) -> bool {
        self.is_any() || self == supplied
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Builds a `[TypeKey; N]` from a list of types.
///
/// ```ignore
/// let params = type_keys![u32, String];
/// ```
#[macro_export]
macro_rules! type_keys {
    ($($ty:ty),* $(,)?) => {
        [$($crate::TypeKey::of::<$ty>()),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_name() {
        assert_eq!(TypeKey::of::<u32>(), TypeKey::of::<u32>());
        assert_ne!(TypeKey::of::<u32>(), TypeKey::of::<i32>());
        assert_eq!(TypeKey::of::<Vec<u8>>().short_name(), "Vec<u8>");
    }

    #[test]
    fn any_accepts_everything() {
        let any = TypeKey::any();
        assert!(any.accepts(&TypeKey::of::<String>()));
        assert!(TypeKey::of::<u8>().accepts(&TypeKey::of::<u8>()));
        assert!(!TypeKey::of::<u8>().accepts(&TypeKey::of::<u16>()));
    }

    #[test]
    fn value_key_is_the_runtime_type() {
        let value: Box<dyn Reflect> = Box::new(5u64);
        assert_eq!(TypeKey::of_value(value.as_ref()), TypeKey::of::<u64>());
        assert_eq!(type_keys![u8, String], [TypeKey::of::<u8>(), TypeKey::of::<String>()]);
    }
}

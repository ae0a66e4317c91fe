use std::{any::TypeId, fmt::Debug};

use crate::{
    TypeInfo, Reflect, Typed, TypeKey, Semantics,
    type_info_cell,
    members::Members,
};

/// Types that can produce their own [`TypeRegistration`].
///
/// Implemented by `#[derive(Reflect)]` and for the std types this crate reflects.
pub trait GetTypeRegistration {
    fn get_type_registration() -> TypeRegistration;
}

/// Everything the registry knows about one reflected type.
///
/// Fields come from the type's [`TypeInfo`]. Properties, methods, constructors,
/// indexers and static fields have no compile-time counterpart in Rust, so they
/// are added by hand through [`TypeRegistration::members_mut`].
#[derive(Clone)]
pub struct TypeRegistration {
    short_name: String,
    /// type_info fetches from the Typed::type_info()
    type_info: &'static TypeInfo,
    semantics: Semantics,
    members: Members,
}

impl Debug for TypeRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistration")
            .field("short_name", &self.short_name)
            .field("semantics", &self.semantics)
            .field("members", &self.members)
            .finish()
    }
}

impl TypeRegistration {
    pub fn type_of<T: Reflect + Typed>() -> Self {
        let type_name = std::any::type_name::<T>();
        Self {
            short_name: type_info_cell::get_type_collapsed_name(type_name),
            type_info: T::type_info(),
            semantics: T::semantics(),
            members: Members::default(),
        }
    }

    /// Registration of a list or array built from its runtime type info alone.
    pub(crate) fn of_container(type_info: &'static TypeInfo) -> Self {
        Self {
            short_name: type_info_cell::get_type_collapsed_name(type_info.type_name()),
            type_info,
            semantics: Semantics::Value,
            members: Members::default(),
        }
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_info.type_name()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_info.type_id()
    }

    #[inline]
    pub fn type_key(&self) -> TypeKey {
        self.type_info.type_key()
    }

    pub fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    pub fn semantics(&self) -> Semantics {
        self.semantics
    }

    /// Override the semantics declared by the type itself.
    pub fn set_semantics(&mut self, semantics: Semantics) {
        self.semantics = semantics;
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }
}

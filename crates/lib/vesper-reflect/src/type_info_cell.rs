use std::{collections::HashMap, any::{TypeId, Any}};

use once_cell::race::OnceBox;
use parking_lot::RwLock;

use crate::type_info::TypeInfo;

/// TypeInfo container to store reflected TypeInfo from macro.
///
/// Use a OnceCell to make TypeInfo has static lifetime.
pub struct NonGenericTypeInfoOnceCell(OnceBox<TypeInfo>);

impl NonGenericTypeInfoOnceCell {
    pub const fn new() -> Self {
        Self(OnceBox::new())
    }

    pub fn get_or_set<F>(&self, func: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(|| Box::new(func()))
    }
}

impl Default for NonGenericTypeInfoOnceCell {
    fn default() -> Self {
        Self::new()
    }
}

/// TypeInfo container for generic types.
///
/// A `static` inside a generic impl is shared by every instantiation,
/// so the infos are keyed by the [`TypeId`] of the concrete type.
pub struct GenericTypeInfoOnceCell(OnceBox<RwLock<HashMap<TypeId, &'static TypeInfo>>>);

impl GenericTypeInfoOnceCell {
    pub const fn new() -> Self {
        Self(OnceBox::new())
    }

    pub fn get_or_insert<T, F>(&self, func: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
        T: Any + ?Sized
    {
        let type_id = TypeId::of::<T>();
        let map = self.0.get_or_init(Box::default);
        // already cached for this generic type, return it.
        if let Some(info) = map.read().get(&type_id).copied() {
            return info;
        }

        // found a new generic type, insert it into the map.
        *map.write().entry(type_id).or_insert_with(|| {
            // leaked on purpose: type infos live for the whole program.
            Box::leak(Box::new(func()))
        })
    }
}

impl Default for GenericTypeInfoOnceCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortens a type name to remove all module paths.
///
/// The short name of a type is its full name as returned by
/// [`std::any::type_name`], but with the prefix of all paths removed. For
/// example, the short name of `alloc::vec::Vec<core::option::Option<u32>>`
/// would be `Vec<Option<u32>>`.
pub fn get_type_collapsed_name(full_name: &str) -> String {
    let mut parsed_name = String::with_capacity(full_name.len());
    let mut rest = full_name;

    // Generics result in nested paths within <..> blocks, so collapse every
    // segment between two special characters separately.
    while let Some(special_index) = rest.find(is_special_character) {
        let (segment, tail) = rest.split_at(special_index);
        parsed_name += collapse_type_name(segment);

        let special_len = tail.chars().next().map_or(1, char::len_utf8);
        parsed_name.push_str(&tail[..special_len]);
        rest = &tail[special_len..];
    }
    parsed_name += collapse_type_name(rest);

    parsed_name
}

#[inline]
fn is_special_character(c: char) -> bool {
    matches!(c, ' ' | '<' | '>' | '(' | ')' | '[' | ']' | ',' | ';' | '&')
}

#[inline(always)]
fn collapse_type_name(string: &str) -> &str {
    string.rsplit("::").next().unwrap_or(string)
}

#[cfg(test)]
mod tests {
    use super::get_type_collapsed_name;

    #[test]
    fn collapse_nested_generics() {
        assert_eq!(get_type_collapsed_name("alloc::vec::Vec<core::option::Option<u32>>"), "Vec<Option<u32>>");
        assert_eq!(get_type_collapsed_name("[my_crate::Point; 4]"), "[Point; 4]");
        assert_eq!(get_type_collapsed_name("(u8, alloc::string::String)"), "(u8, String)");
        assert_eq!(get_type_collapsed_name("dyn vesper_reflect::reflect::Reflect"), "dyn Reflect");
    }
}

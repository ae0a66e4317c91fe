use std::fmt::Debug;

use vesper_reflect::{Reflect, ReflectResult, TypeKey, Value, cast};

/// Owning box around one value-type instance.
///
/// Mutating thunks of value types write into the held instance in place, so
/// callers observe the change through the same holder afterwards. The holder
/// is deliberately not `Clone`: copying it would silently fork the instance.
pub struct ValueHolder {
    value: Value,
}

impl ValueHolder {
    pub fn new<T: Reflect>(value: T) -> Self {
        Self::from_value(Box::new(value))
    }

    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &dyn Reflect {
        &*self.value
    }

    pub fn get_mut(&mut self) -> &mut dyn Reflect {
        &mut *self.value
    }

    pub fn type_key(&self) -> TypeKey {
        TypeKey::of_value(self.get())
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn into_inner(self) -> Value {
        self.value
    }

    /// Take the held instance back as a `T`.
    pub fn unwrap<T: Reflect>(self) -> ReflectResult<T> {
        cast::<T>(self.value)
    }
}

impl Debug for ValueHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ValueHolder")
            .field(&self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holder_mutates_in_place_and_unwraps() {
        let mut holder = ValueHolder::new(3u32);
        holder.get_mut().set(Box::new(9u32)).unwrap();

        assert_eq!(holder.downcast_ref::<u32>(), Some(&9));
        assert_eq!(holder.type_key(), TypeKey::of::<u32>());
        assert_eq!(holder.unwrap::<u32>().unwrap(), 9);
    }

    #[test]
    fn unwrap_to_wrong_type_fails() {
        let holder = ValueHolder::new(String::from("x"));
        assert!(holder.unwrap::<u32>().is_err());
    }
}

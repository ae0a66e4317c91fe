use std::fmt;

use vesper_reflect::TypeKey;

/// Kind of member a descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberCategory {
    Field,
    Property,
    Method,
    Constructor,
    ArrayElement,
    Indexer,
}

/// Name of the member.
///
/// Members without a user visible name use dedicated variants, which can
/// never collide with a [`MemberName::Named`] member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberName {
    Named(String),
    Constructor,
    ElementGet,
    ElementSet,
    IndexerGet,
    IndexerSet,
}

impl MemberName {
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    fn implied_access(&self) -> Access {
        match self {
            Self::ElementSet | Self::IndexerSet => Access::Write,
            _ => Access::Read,
        }
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Constructor => f.write_str("<constructor>"),
            Self::ElementGet => f.write_str("<element get>"),
            Self::ElementSet => f.write_str("<element set>"),
            Self::IndexerGet => f.write_str("<indexer get>"),
            Self::IndexerSet => f.write_str("<indexer set>"),
        }
    }
}

impl From<&str> for MemberName {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for MemberName {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

/// How the receiver of the member is passed to the thunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiverKind {
    /// No receiver.
    Static,
    /// A plain borrow or a shared [`ObjectRef`](crate::ObjectRef).
    Instance,
    /// A [`ValueHolder`](crate::ValueHolder) mutated in place.
    Boxed,
}

/// Structural key of one member operation.
///
/// Two descriptors are equal iff every component is equal, parameter types
/// compared in order. A descriptor never changes once built: the modifiers
/// consume it and return a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberDescriptor {
    target: TypeKey,
    category: MemberCategory,
    name: MemberName,
    /// `None` when the caller supplied no signature.
    parameter_types: Option<Vec<TypeKey>>,
    access: Access,
    receiver: ReceiverKind,
}

impl MemberDescriptor {
    pub fn new(
        target: TypeKey,
        category: MemberCategory,
        name: impl Into<MemberName>,
        parameter_types: Option<Vec<TypeKey>>,
        receiver: ReceiverKind,
    ) -> Self {
        let name = name.into();
        Self {
            target,
            category,
            access: name.implied_access(),
            name,
            parameter_types,
            receiver,
        }
        .normalized()
    }

    pub fn field<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::named::<T>(MemberCategory::Field, name)
    }

    pub fn property<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::named::<T>(MemberCategory::Property, name)
    }

    pub fn method<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::named::<T>(MemberCategory::Method, name)
    }

    pub fn constructor<T: ?Sized + 'static>() -> Self {
        Self::new(TypeKey::of::<T>(), MemberCategory::Constructor, MemberName::Constructor, None, ReceiverKind::Static)
    }

    /// Element read of the list or array type `T`.
    pub fn element<T: ?Sized + 'static>() -> Self {
        Self::new(TypeKey::of::<T>(), MemberCategory::ArrayElement, MemberName::ElementGet, None, ReceiverKind::Instance)
    }

    /// Indexer read of `T`.
    pub fn indexer<T: ?Sized + 'static>() -> Self {
        Self::new(TypeKey::of::<T>(), MemberCategory::Indexer, MemberName::IndexerGet, None, ReceiverKind::Instance)
    }

    fn named<T: ?Sized + 'static>(category: MemberCategory, name: impl Into<String>) -> Self {
        Self::new(TypeKey::of::<T>(), category, MemberName::Named(name.into()), None, ReceiverKind::Instance)
    }

    /// Supply the exact, ordered parameter signature.
    pub fn with_params(mut self, params: impl IntoIterator<Item = TypeKey>) -> Self {
        self.parameter_types = Some(params.into_iter().collect());
        self
    }

    /// Turn a read into a write. Element and indexer names follow.
    pub fn write(mut self) -> Self {
        self.access = Access::Write;
        self.name = match self.name {
            MemberName::ElementGet => MemberName::ElementSet,
            MemberName::IndexerGet => MemberName::IndexerSet,
            name => name,
        };
        self
    }

    pub fn static_(mut self) -> Self {
        self.receiver = ReceiverKind::Static;
        self
    }

    /// Pass the receiver as a [`ValueHolder`](crate::ValueHolder).
    pub fn boxed(mut self) -> Self {
        self.receiver = ReceiverKind::Boxed;
        self.normalized()
    }

    #[inline]
    pub fn target(&self) -> TypeKey {
        self.target
    }

    #[inline]
    pub fn category(&self) -> MemberCategory {
        self.category
    }

    #[inline]
    pub fn name(&self) -> &MemberName {
        &self.name
    }

    #[inline]
    pub fn parameter_types(&self) -> Option<&[TypeKey]> {
        self.parameter_types.as_deref()
    }

    #[inline]
    pub fn access(&self) -> Access {
        self.access
    }

    #[inline]
    pub fn receiver(&self) -> ReceiverKind {
        self.receiver
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.receiver == ReceiverKind::Static
    }

    // constructors never take a receiver
    fn normalized(mut self) -> Self {
        if self.category == MemberCategory::Constructor {
            self.receiver = ReceiverKind::Static;
        }
        self
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}::{}", self.category, self.target.short_name(), self.name)?;
        if let Some(params) = &self.parameter_types {
            let params = params.iter().map(TypeKey::short_name).collect::<Vec<_>>();
            write!(f, "({})", params.join(", "))?;
        }
        write!(f, " [{:?}, {:?}]", self.access, self.receiver)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use vesper_reflect::type_keys;

    use super::*;

    struct Widget;

    #[test]
    fn structurally_equal_descriptors_are_equal() {
        let a = MemberDescriptor::method::<Widget>("resize").with_params(type_keys![u32, u32]);
        let b = MemberDescriptor::method::<Widget>("resize").with_params(type_keys![u32, u32]);
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn sentinel_names_follow_access() {
        let get = MemberDescriptor::indexer::<Widget>();
        let set = get.clone().write();

        assert_eq!(get.access(), Access::Read);
        assert_eq!(set.access(), Access::Write);
        assert_eq!(set.name(), &MemberName::IndexerSet);
        assert_ne!(get, set);

        let element = MemberDescriptor::new(
            TypeKey::of::<Vec<u8>>(), MemberCategory::ArrayElement, MemberName::ElementSet, None, ReceiverKind::Boxed,
        );
        assert_eq!(element.access(), Access::Write);
    }

    #[test]
    fn sentinels_never_alias_user_names() {
        let user = MemberDescriptor::method::<Widget>("<constructor>");
        let ctor = MemberDescriptor::new(
            TypeKey::of::<Widget>(), MemberCategory::Method, MemberName::Constructor, None, ReceiverKind::Instance,
        );
        assert_ne!(user, ctor);
    }

    #[test]
    fn constructors_are_always_static() {
        let ctor = MemberDescriptor::constructor::<Widget>().boxed();
        assert!(ctor.is_static());

        let ctor = MemberDescriptor::new(
            TypeKey::of::<Widget>(), MemberCategory::Constructor, MemberName::Constructor, None, ReceiverKind::Instance,
        );
        assert_eq!(ctor, MemberDescriptor::constructor::<Widget>());
    }

    #[test]
    fn missing_signature_differs_from_empty_signature() {
        let unspecified = MemberDescriptor::method::<Widget>("reset");
        let empty = MemberDescriptor::method::<Widget>("reset").with_params([]);
        assert_ne!(unspecified, empty);
        assert_eq!(empty.parameter_types(), Some(&[][..]));
    }
}

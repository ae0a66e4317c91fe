//! Members that are not visible in a type's layout.
//!
//! `#[derive(Reflect)]` only describes fields. Properties, methods,
//! constructors, indexers and static fields are registered by hand on the
//! [`TypeRegistration`](crate::TypeRegistration) of their declaring type:
//!
//! ```ignore
//! registry.members_mut::<Counter>()
//!     .add_property(PropertyInfo::read_only("doubled", |c: &Counter| c.value * 2))
//!     .add_constructor(ConstructorInfo::default_of::<Counter>());
//! ```

mod args;
mod property;
mod method;
mod constructor;
mod indexer;
mod static_field;

pub use args::Args;
pub use property::{PropertyInfo, PropertyGetFn, PropertySetFn};
pub use method::{MethodInfo, MethodFn};
pub use constructor::{ConstructorInfo, ConstructorFn};
pub use indexer::{IndexerInfo, IndexGetFn, IndexSetFn};
pub use static_field::StaticFieldInfo;

/// Hand registered members of one type.
#[derive(Debug, Clone, Default)]
pub struct Members {
    properties: Vec<PropertyInfo>,
    methods: Vec<MethodInfo>,
    constructors: Vec<ConstructorInfo>,
    indexers: Vec<IndexerInfo>,
    static_fields: Vec<StaticFieldInfo>,
}

impl Members {
    pub fn add_property(&mut self, property: PropertyInfo) -> &mut Self {
        glog::debug!("register property `{}`", property.name());
        self.properties.push(property);
        self
    }

    pub fn add_method(&mut self, method: MethodInfo) -> &mut Self {
        glog::debug!("register method `{}` with {} parameter(s)", method.name(), method.params().len());
        self.methods.push(method);
        self
    }

    pub fn add_constructor(&mut self, constructor: ConstructorInfo) -> &mut Self {
        glog::debug!("register constructor of `{}`", constructor.target());
        self.constructors.push(constructor);
        self
    }

    pub fn add_indexer(&mut self, indexer: IndexerInfo) -> &mut Self {
        glog::debug!("register indexer of `{}`", indexer.target());
        self.indexers.push(indexer);
        self
    }

    pub fn add_static_field(&mut self, field: StaticFieldInfo) -> &mut Self {
        glog::debug!("register static field `{}`", field.name());
        self.static_fields.push(field);
        self
    }

    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    pub fn indexers(&self) -> &[IndexerInfo] {
        &self.indexers
    }

    pub fn static_fields(&self) -> &[StaticFieldInfo] {
        &self.static_fields
    }

    pub fn properties_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PropertyInfo> + 'a {
        self.properties.iter().filter(move |property| property.name() == name)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodInfo> + 'a {
        self.methods.iter().filter(move |method| method.name() == name)
    }

    pub fn static_field(&self, name: &str) -> Option<&StaticFieldInfo> {
        self.static_fields.iter().find(|field| field.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.methods.is_empty()
            && self.constructors.is_empty()
            && self.indexers.is_empty()
            && self.static_fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TypeKey, TypeRegistry};

    #[test]
    fn members_accumulate_on_the_registration() {
        let mut registry = TypeRegistry::new();
        registry.members_mut::<String>()
            .add_property(PropertyInfo::read_only("len", |s: &String| s.len()))
            .add_method(MethodInfo::instance("clear", &[], |s: &mut String, _| {
                s.clear();
                Ok(())
            }))
            .add_method(MethodInfo::instance("clear", &[TypeKey::of::<bool>()], |s: &mut String, _| {
                s.clear();
                Ok(())
            }))
            .add_constructor(ConstructorInfo::default_of::<String>());

        let registration = registry.registration_of(TypeKey::of::<String>()).unwrap();
        let members = registration.members();
        assert_eq!(members.properties_named("len").count(), 1);
        assert_eq!(members.methods_named("clear").count(), 2);
        assert_eq!(members.constructors().len(), 1);
        assert!(members.static_field("len").is_none());
        assert!(!members.is_empty());
    }
}

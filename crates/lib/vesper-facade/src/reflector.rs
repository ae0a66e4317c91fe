use std::sync::Arc;

use once_cell::sync::Lazy;

use vesper_access::{
    cast, AccessError, AccessResult, Constructor, ElementGetter, ElementSetter, Getter, IndexGetter,
    IndexSetter, Invoker, MemberCategory, MemberDescriptor, MemberName, ReceiverKind, Setter, Synthesizer,
    Target, Thunk, ThunkCache, Value,
};
use vesper_reflect::{
    GetTypeRegistration, Members, Reflect, TypeKey, TypeRegistry, TypeRegistryArc,
};

/// Name-based member access on top of one [`ThunkCache`] scope.
///
/// Every call builds a [`MemberDescriptor`] from the receiver and the runtime
/// types of its arguments, then goes through the cache, so repeated calls
/// reuse one synthesized thunk. Callers in a hot loop should hold on to the
/// typed thunks from [`Reflector::getter`] and friends instead.
#[derive(Clone)]
pub struct Reflector {
    registry: TypeRegistryArc,
    cache: Arc<ThunkCache>,
    synthesizer: Synthesizer,
}

impl Reflector {
    /// Reflector over a registry preloaded with the primitive types.
    pub fn new() -> Self {
        Self::with_registry(TypeRegistryArc::new(TypeRegistry::new()))
    }

    pub fn with_registry(registry: TypeRegistryArc) -> Self {
        Self::with_cache(registry, Arc::new(ThunkCache::new()))
    }

    /// Reflector sharing an existing cache scope.
    pub fn with_cache(registry: TypeRegistryArc, cache: Arc<ThunkCache>) -> Self {
        Self {
            synthesizer: Synthesizer::with_provider(registry.clone()),
            registry,
            cache,
        }
    }

    pub fn register<T: GetTypeRegistration>(&self) {
        self.registry.write().register::<T>();
    }

    /// Edit the registered members of `T`, registering `T` first if needed.
    pub fn members<T, R>(&self, f: impl FnOnce(&mut Members) -> R) -> R
    where
        T: GetTypeRegistration + 'static,
    {
        f(self.registry.write().members_mut::<T>())
    }

    /// Register a list or array receiver from its runtime type info.
    fn register_receiver(&self, instance: &Target<'_>) {
        let Some(type_info) = instance.type_info() else {
            return;
        };

        if !self.registry.read().contains(type_info.type_id()) {
            self.registry.write().register_container(type_info);
        }
    }

    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<ThunkCache> {
        &self.cache
    }

    pub fn get_field(&self, instance: Target<'_>, name: &str) -> AccessResult<Value> {
        let descriptor = instance_descriptor(&instance, MemberCategory::Field, name, None)?;
        Ok(self.getter(&descriptor)?.get(instance)?)
    }

    pub fn set_field(&self, instance: Target<'_>, name: &str, value: Value) -> AccessResult<()> {
        let descriptor = instance_descriptor(&instance, MemberCategory::Field, name, None)?.write();
        Ok(self.setter(&descriptor)?.set(instance, value)?)
    }

    /// Assign several fields in order, stopping at the first failure.
    pub fn set_fields<'n>(
        &self,
        mut instance: Target<'_>,
        values: impl IntoIterator<Item = (&'n str, Value)>,
    ) -> AccessResult<()> {
        for (name, value) in values {
            self.set_field(instance.reborrow(), name, value)?;
        }
        Ok(())
    }

    pub fn get_property(&self, instance: Target<'_>, name: &str) -> AccessResult<Value> {
        let descriptor = instance_descriptor(&instance, MemberCategory::Property, name, None)?;
        Ok(self.getter(&descriptor)?.get(instance)?)
    }

    pub fn set_property(&self, instance: Target<'_>, name: &str, value: Value) -> AccessResult<()> {
        let descriptor = instance_descriptor(&instance, MemberCategory::Property, name, None)?.write();
        Ok(self.setter(&descriptor)?.set(instance, value)?)
    }

    /// Read the static field `name` of `T`.
    pub fn get_static<T: ?Sized + 'static>(&self, name: &str) -> AccessResult<Value> {
        let descriptor = MemberDescriptor::field::<T>(name).static_();
        Ok(self.getter(&descriptor)?.get(Target::Static)?)
    }

    pub fn set_static<T: ?Sized + 'static>(&self, name: &str, value: Value) -> AccessResult<()> {
        let descriptor = MemberDescriptor::field::<T>(name).static_().write();
        Ok(self.setter(&descriptor)?.set(Target::Static, value)?)
    }

    pub fn get_static_property<T: ?Sized + 'static>(&self, name: &str) -> AccessResult<Value> {
        let descriptor = MemberDescriptor::property::<T>(name).static_();
        Ok(self.getter(&descriptor)?.get(Target::Static)?)
    }

    pub fn set_static_property<T: ?Sized + 'static>(&self, name: &str, value: Value) -> AccessResult<()> {
        let descriptor = MemberDescriptor::property::<T>(name).static_().write();
        Ok(self.setter(&descriptor)?.set(Target::Static, value)?)
    }

    /// Call the instance method `name`, picking the overload matching the argument types.
    pub fn call_method(&self, instance: Target<'_>, name: &str, args: Vec<Value>) -> AccessResult<Value> {
        let descriptor = instance_descriptor(&instance, MemberCategory::Method, name, Some(signature_of(&args)))?;
        Ok(self.invoker(&descriptor)?.invoke(instance, args)?)
    }

    pub fn call_static_method<T: ?Sized + 'static>(&self, name: &str, args: Vec<Value>) -> AccessResult<Value> {
        let descriptor = MemberDescriptor::method::<T>(name)
            .with_params(signature_of(&args))
            .static_();
        Ok(self.invoker(&descriptor)?.invoke(Target::Static, args)?)
    }

    /// Build a `T` through the registered constructor matching the argument types.
    pub fn create_instance<T: Reflect>(&self, args: Vec<Value>) -> AccessResult<T> {
        let value = self.create_object(TypeKey::of::<T>(), args)?;
        Ok(cast::<T>(value)?)
    }

    /// Like [`Reflector::create_instance`] for a type only known at runtime.
    pub fn create_object(&self, target: TypeKey, args: Vec<Value>) -> AccessResult<Value> {
        let descriptor = MemberDescriptor::new(
            target,
            MemberCategory::Constructor,
            MemberName::Constructor,
            Some(signature_of(&args)),
            ReceiverKind::Static,
        );
        Ok(self.constructor(&descriptor)?.construct(args)?)
    }

    /// Read an element of a list or array.
    ///
    /// Lists and arrays need no explicit registration: the receiver's own
    /// type info is registered on first use.
    pub fn get_element(&self, instance: Target<'_>, index: usize) -> AccessResult<Value> {
        let descriptor = instance_descriptor(&instance, MemberCategory::ArrayElement, MemberName::ElementGet, None)?;
        self.register_receiver(&instance);
        Ok(self.thunk::<ElementGetter>(&descriptor)?.get(instance, index)?)
    }

    /// Write an element of a list or array, see [`Reflector::get_element`].
    pub fn set_element(&self, instance: Target<'_>, index: usize, value: Value) -> AccessResult<()> {
        let descriptor = instance_descriptor(&instance, MemberCategory::ArrayElement, MemberName::ElementSet, None)?;
        self.register_receiver(&instance);
        Ok(self.thunk::<ElementSetter>(&descriptor)?.set(instance, index, value)?)
    }

    pub fn get_indexer(&self, instance: Target<'_>, args: Vec<Value>) -> AccessResult<Value> {
        let descriptor = instance_descriptor(&instance, MemberCategory::Indexer, MemberName::IndexerGet, Some(signature_of(&args)))?;
        Ok(self.thunk::<IndexGetter>(&descriptor)?.get(instance, args)?)
    }

    /// Assign through the indexer matching the argument types and the value type.
    pub fn set_indexer(&self, instance: Target<'_>, mut args: Vec<Value>, value: Value) -> AccessResult<()> {
        args.push(value);
        let descriptor = instance_descriptor(&instance, MemberCategory::Indexer, MemberName::IndexerSet, Some(signature_of(&args)))?;
        Ok(self.thunk::<IndexSetter>(&descriptor)?.set(instance, args)?)
    }

    pub fn getter(&self, descriptor: &MemberDescriptor) -> AccessResult<Getter> {
        self.thunk(descriptor)
    }

    pub fn setter(&self, descriptor: &MemberDescriptor) -> AccessResult<Setter> {
        self.thunk(descriptor)
    }

    pub fn invoker(&self, descriptor: &MemberDescriptor) -> AccessResult<Invoker> {
        self.thunk(descriptor)
    }

    pub fn constructor(&self, descriptor: &MemberDescriptor) -> AccessResult<Constructor> {
        self.thunk(descriptor)
    }

    /// Cached thunk for `descriptor`, narrowed to `S`.
    pub fn thunk<S>(&self, descriptor: &MemberDescriptor) -> AccessResult<S>
    where
        S: TryFrom<Thunk, Error = AccessError>,
    {
        self.cache.get_or_synthesize_as(descriptor, &self.synthesizer)
    }

    /// Close the cache scope. Thunks already handed out keep working.
    pub fn dispose(&self) {
        glog::debug!("disposing reflector cache");
        self.cache.dispose();
    }
}

impl Default for Reflector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Reflector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reflector")
            .field("registry", &self.registry)
            .field("cache", &self.cache)
            .finish()
    }
}

static GLOBAL: Lazy<Reflector> = Lazy::new(Reflector::new);

/// Process-wide reflector, created on first use.
pub fn global() -> &'static Reflector {
    &GLOBAL
}

fn signature_of(args: &[Value]) -> Vec<TypeKey> {
    args.iter()
        .map(|arg| TypeKey::of_value(&**arg))
        .collect()
}

fn instance_descriptor(
    instance: &Target<'_>,
    category: MemberCategory,
    name: impl Into<MemberName>,
    params: Option<Vec<TypeKey>>,
) -> AccessResult<MemberDescriptor> {
    let name = name.into();
    let target = instance.type_key()
        .ok_or_else(|| AccessError::InvalidTargetKind {
            target: TypeKey::any(),
            member: name.to_string(),
            reason: "instance members need a receiver",
        })?;
    Ok(MemberDescriptor::new(target, category, name, params, instance.kind()))
}

#[cfg(test)]
mod tests {
    use vesper_reflect::Reflect;

    use super::*;

    #[derive(Reflect, Clone)]
    struct Sounding {
        depth: u8,
    }

    #[test]
    fn static_target_is_not_an_instance() {
        let reflector = Reflector::new();
        reflector.register::<Sounding>();

        let err = reflector.get_field(Target::Static, "depth").unwrap_err();
        assert!(matches!(err, AccessError::InvalidTargetKind { .. }));
        assert_eq!(
            cast::<u8>(reflector.get_field(Target::Ref(&Sounding { depth: 3 }), "depth").unwrap()).unwrap(),
            3,
        );
    }

    #[test]
    fn signatures_follow_runtime_types() {
        let args: Vec<Value> = vec![Box::new(1u8), Box::new(String::new())];
        assert_eq!(signature_of(&args), vec![TypeKey::of::<u8>(), TypeKey::of::<String>()]);
    }
}

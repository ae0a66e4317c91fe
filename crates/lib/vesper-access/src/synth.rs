use std::sync::Arc;

use vesper_reflect::Semantics;

use crate::{
    Access, AccessError, AccessResult, ClosureCompiler, MemberCategory, MemberDescriptor,
    MetadataProvider, ReceiverKind, ResolvedMember, Shape, Thunk, ThunkCompiler,
};

/// Builds thunks for cache misses: picks the shape, validates the receiver,
/// resolves the member and hands it to the compiler.
#[derive(Clone)]
pub struct Synthesizer {
    provider: Arc<dyn MetadataProvider>,
    compiler: Arc<dyn ThunkCompiler>,
}

impl Synthesizer {
    pub fn new(provider: Arc<dyn MetadataProvider>, compiler: Arc<dyn ThunkCompiler>) -> Self {
        Self { provider, compiler }
    }

    /// Synthesizer compiling with [`ClosureCompiler`].
    pub fn with_provider(provider: impl MetadataProvider + 'static) -> Self {
        Self::new(Arc::new(provider), Arc::new(ClosureCompiler))
    }

    pub fn provider(&self) -> &Arc<dyn MetadataProvider> {
        &self.provider
    }

    /// Calling convention of the thunk `descriptor` asks for.
    pub fn shape_of(descriptor: &MemberDescriptor) -> AccessResult<Shape> {
        let shape = match (descriptor.category(), descriptor.access()) {
            (MemberCategory::Field | MemberCategory::Property, Access::Read) => Shape::Getter,
            (MemberCategory::Field | MemberCategory::Property, Access::Write) => Shape::Setter,
            (MemberCategory::Method, Access::Read) => Shape::Invoker,
            (MemberCategory::Constructor, Access::Read) => Shape::Constructor,
            (MemberCategory::ArrayElement, Access::Read) => Shape::ElementGetter,
            (MemberCategory::ArrayElement, Access::Write) => Shape::ElementSetter,
            (MemberCategory::Indexer, Access::Read) => Shape::IndexGetter,
            (MemberCategory::Indexer, Access::Write) => Shape::IndexSetter,
            (MemberCategory::Method | MemberCategory::Constructor, Access::Write) => {
                return Err(AccessError::invalid_target(descriptor, "methods and constructors cannot be written"));
            }
        };
        Ok(shape)
    }

    pub fn synthesize(&self, descriptor: &MemberDescriptor) -> AccessResult<Thunk> {
        let shape = Self::shape_of(descriptor)?;

        let semantics = self.provider
            .semantics(descriptor.target())
            .ok_or_else(|| AccessError::not_found(descriptor))?;
        check_receiver(descriptor, shape, semantics)?;

        let member = self.provider.resolve(descriptor)?;
        check_access(descriptor, &member)?;

        glog::debug!("synthesizing {} thunk for {}", shape, descriptor);
        self.compiler.compile(&member, &shape)
    }
}

impl std::fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer").finish_non_exhaustive()
    }
}

fn check_receiver(descriptor: &MemberDescriptor, shape: Shape, semantics: Semantics) -> AccessResult<()> {
    let reason = match descriptor.receiver() {
        ReceiverKind::Static if matches!(descriptor.category(), MemberCategory::ArrayElement | MemberCategory::Indexer) => {
            "array elements and indexers need an instance"
        }
        ReceiverKind::Instance if semantics == Semantics::Value && shape.is_mutating() => {
            "value-type instances must be boxed to be mutated in place"
        }
        ReceiverKind::Boxed if semantics == Semantics::Reference => {
            "reference-type instances cannot be boxed"
        }
        _ => return Ok(()),
    };
    Err(AccessError::invalid_target(descriptor, reason))
}

fn check_access(descriptor: &MemberDescriptor, member: &ResolvedMember) -> AccessResult<()> {
    match descriptor.access() {
        Access::Read if !member.can_read() => Err(AccessError::invalid_target(descriptor, "member is write-only")),
        Access::Write if !member.can_write() => Err(AccessError::invalid_target(descriptor, "member is read-only")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use vesper_reflect::{Reflect, TypeRegistry, TypeRegistryArc, PropertyInfo, TypeKey};

    use super::*;

    #[derive(Reflect, Clone)]
    struct Meter {
        reading: u32,
    }

    #[derive(Reflect, Clone)]
    #[reflect(reference)]
    struct Session {
        user: String,
    }

    fn synthesizer() -> Synthesizer {
        let mut registry = TypeRegistry::new();
        registry.register::<Session>();
        registry.register::<Vec<u8>>();
        registry.members_mut::<Meter>()
            .add_property(PropertyInfo::read_only("doubled", |m: &Meter| m.reading * 2))
            .add_property(PropertyInfo::write_only("reset_to", |m: &mut Meter, value: u32| m.reading = value));
        Synthesizer::with_provider(TypeRegistryArc::from(registry))
    }

    fn assert_invalid(result: AccessResult<Thunk>) {
        assert!(matches!(result, Err(AccessError::InvalidTargetKind { .. })), "{result:?}");
    }

    #[test]
    fn shapes_follow_category_and_access() {
        let field = MemberDescriptor::field::<Meter>("reading");
        assert_eq!(Synthesizer::shape_of(&field).unwrap(), Shape::Getter);
        assert_eq!(Synthesizer::shape_of(&field.write()).unwrap(), Shape::Setter);
        assert_eq!(Synthesizer::shape_of(&MemberDescriptor::element::<Vec<u8>>().write()).unwrap(), Shape::ElementSetter);
        assert_eq!(Synthesizer::shape_of(&MemberDescriptor::indexer::<Meter>()).unwrap(), Shape::IndexGetter);

        let err = Synthesizer::shape_of(&MemberDescriptor::method::<Meter>("tick").write()).unwrap_err();
        assert!(matches!(err, AccessError::InvalidTargetKind { .. }));
    }

    #[test]
    fn value_types_must_be_boxed_for_mutation() {
        let synthesizer = synthesizer();
        assert_invalid(synthesizer.synthesize(&MemberDescriptor::field::<Meter>("reading").write()));
        assert!(synthesizer.synthesize(&MemberDescriptor::field::<Meter>("reading").write().boxed()).is_ok());
        // reads through a plain borrow are fine
        assert!(synthesizer.synthesize(&MemberDescriptor::field::<Meter>("reading")).is_ok());
    }

    #[test]
    fn reference_types_cannot_be_boxed() {
        let synthesizer = synthesizer();
        assert_invalid(synthesizer.synthesize(&MemberDescriptor::field::<Session>("user").boxed()));
        assert!(synthesizer.synthesize(&MemberDescriptor::field::<Session>("user").write()).is_ok());
    }

    #[test]
    fn elements_need_an_instance() {
        let synthesizer = synthesizer();
        assert_invalid(synthesizer.synthesize(&MemberDescriptor::element::<Vec<u8>>().static_()));
    }

    #[test]
    fn read_only_and_write_only_members_are_rejected() {
        let synthesizer = synthesizer();
        assert_invalid(synthesizer.synthesize(&MemberDescriptor::property::<Meter>("doubled").write().boxed()));
        assert_invalid(synthesizer.synthesize(&MemberDescriptor::property::<Meter>("reset_to")));
        assert!(synthesizer.synthesize(&MemberDescriptor::property::<Meter>("reset_to").write().boxed()).is_ok());
    }

    #[test]
    fn unknown_types_are_not_found() {
        let synthesizer = synthesizer();
        let descriptor = MemberDescriptor::new(
            TypeKey::of::<std::net::Ipv4Addr>(),
            MemberCategory::Field,
            "octets",
            None,
            ReceiverKind::Instance,
        );
        assert!(matches!(synthesizer.synthesize(&descriptor), Err(AccessError::NotFound { .. })));
    }
}

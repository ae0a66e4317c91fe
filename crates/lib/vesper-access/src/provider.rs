use vesper_reflect::{
    TypeInfo, TypeKey, TypeRegistryArc, TypeRegistration, Semantics,
    PropertyInfo, MethodInfo, ConstructorInfo, IndexerInfo, StaticFieldInfo,
};

use crate::{AccessError, AccessResult, MemberCategory, MemberDescriptor, MemberName, ReceiverKind, Access};

/// Source of runtime type metadata consumed by the [`Synthesizer`](crate::Synthesizer).
pub trait MetadataProvider: Send + Sync {
    /// Find the one member `descriptor` refers to.
    ///
    /// Fails with [`AccessError::NotFound`] when nothing matches and
    /// [`AccessError::Ambiguous`] when the signature does not single out one overload.
    fn resolve(&self, descriptor: &MemberDescriptor) -> AccessResult<ResolvedMember>;

    /// Value or reference semantics of `target`, `None` if the type is unknown.
    fn semantics(&self, target: TypeKey) -> Option<Semantics>;
}

/// A member located by a [`MetadataProvider`], ready to be compiled.
#[derive(Debug, Clone)]
pub struct ResolvedMember {
    target: TypeKey,
    receiver: ReceiverKind,
    resolution: Resolution,
}

/// What the member turned out to be.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Instance field, addressed by its position among the reflected fields.
    Field {
        index: usize,
        ty: TypeKey,
    },
    StaticField(StaticFieldInfo),
    Property(PropertyInfo),
    Method(MethodInfo),
    Constructor(ConstructorInfo),
    /// Element of a list or array.
    Element {
        item: TypeKey,
    },
    Indexer(IndexerInfo),
}

impl ResolvedMember {
    pub fn new(descriptor: &MemberDescriptor, resolution: Resolution) -> Self {
        Self {
            target: descriptor.target(),
            receiver: descriptor.receiver(),
            resolution,
        }
    }

    pub fn target(&self) -> TypeKey {
        self.target
    }

    pub fn receiver(&self) -> ReceiverKind {
        self.receiver
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn can_read(&self) -> bool {
        match &self.resolution {
            Resolution::Property(property) => property.can_read(),
            Resolution::Indexer(indexer) => indexer.can_read(),
            _ => true,
        }
    }

    pub fn can_write(&self) -> bool {
        match &self.resolution {
            Resolution::Property(property) => property.can_write(),
            Resolution::Indexer(indexer) => indexer.can_write(),
            Resolution::Method(_) | Resolution::Constructor(_) => false,
            _ => true,
        }
    }
}

/// Pick the one candidate matching the descriptor's signature.
///
/// Without a signature every candidate matches. With one, exact matches win;
/// failing those, candidates whose parameters all accept the supplied types
/// (equal type or any-typed parameter) are considered.
pub fn select_overload<'a, M>(
    descriptor: &MemberDescriptor,
    candidates: impl IntoIterator<Item = &'a M>,
    params: impl Fn(&M) -> Vec<TypeKey>,
) -> AccessResult<&'a M>
where
    M: 'a,
{
    let candidates = candidates.into_iter().collect::<Vec<_>>();

    let Some(signature) = descriptor.parameter_types() else {
        return single(descriptor, candidates);
    };

    let exact = candidates.iter()
        .copied()
        .filter(|candidate| params(candidate) == signature)
        .collect::<Vec<_>>();
    if !exact.is_empty() {
        return single(descriptor, exact);
    }

    let compatible = candidates.into_iter()
        .filter(|candidate| {
            let declared = params(candidate);
            declared.len() == signature.len()
                && declared.iter().zip(signature).all(|(declared, supplied)| declared.accepts(supplied))
        })
        .collect::<Vec<_>>();
    single(descriptor, compatible)
}

fn single<'a, M>(descriptor: &MemberDescriptor, mut matches: Vec<&'a M>) -> AccessResult<&'a M> {
    match matches.len() {
        0 => Err(AccessError::not_found(descriptor)),
        1 => Ok(matches.remove(0)),
        n => Err(AccessError::ambiguous(descriptor, n)),
    }
}

/// The registry is the default metadata source.
///
/// Lookup covers the registered type only: Rust types have no base types to search.
impl MetadataProvider for TypeRegistryArc {
    fn resolve(&self, descriptor: &MemberDescriptor) -> AccessResult<ResolvedMember> {
        let registry = self.read();
        let registration = registry.registration_of(descriptor.target())
            .ok_or_else(|| AccessError::not_found(descriptor))?;

        let resolution = match descriptor.category() {
            MemberCategory::Field => resolve_field(registration, descriptor)?,
            MemberCategory::Property => {
                let name = expect_named(descriptor)?;
                let candidates = registration.members()
                    .properties_named(name)
                    .filter(|property| property.is_static() == descriptor.is_static());
                let property = select_overload(descriptor, candidates, |_| Vec::new())?;
                Resolution::Property(property.clone())
            }
            MemberCategory::Method => {
                let name = expect_named(descriptor)?;
                let candidates = registration.members()
                    .methods_named(name)
                    .filter(|method| method.is_static() == descriptor.is_static());
                let method = select_overload(descriptor, candidates, |method| method.params().to_vec())?;
                Resolution::Method(method.clone())
            }
            MemberCategory::Constructor => {
                expect_sentinel(descriptor, &MemberName::Constructor)?;
                let constructor = select_overload(
                    descriptor,
                    registration.members().constructors(),
                    |constructor| constructor.params().to_vec(),
                )?;
                Resolution::Constructor(constructor.clone())
            }
            MemberCategory::ArrayElement => resolve_element(registration, descriptor)?,
            MemberCategory::Indexer => {
                let (sentinel, write) = match descriptor.access() {
                    Access::Read => (MemberName::IndexerGet, false),
                    Access::Write => (MemberName::IndexerSet, true),
                };
                expect_sentinel(descriptor, &sentinel)?;
                let indexer = select_overload(
                    descriptor,
                    registration.members().indexers(),
                    |indexer| if write { indexer.setter_params() } else { indexer.params().to_vec() },
                )?;
                Resolution::Indexer(indexer.clone())
            }
        };

        Ok(ResolvedMember::new(descriptor, resolution))
    }

    fn semantics(&self, target: TypeKey) -> Option<Semantics> {
        self.read()
            .registration_of(target)
            .map(TypeRegistration::semantics)
    }
}

fn expect_named(descriptor: &MemberDescriptor) -> AccessResult<&str> {
    descriptor.name()
        .as_named()
        .ok_or_else(|| AccessError::not_found(descriptor))
}

fn expect_sentinel(descriptor: &MemberDescriptor, sentinel: &MemberName) -> AccessResult<()> {
    (descriptor.name() == sentinel)
        .then_some(())
        .ok_or_else(|| AccessError::not_found(descriptor))
}

fn expect_no_params(descriptor: &MemberDescriptor) -> AccessResult<()> {
    match descriptor.parameter_types() {
        Some(params) if !params.is_empty() => Err(AccessError::not_found(descriptor)),
        _ => Ok(()),
    }
}

fn resolve_field(registration: &TypeRegistration, descriptor: &MemberDescriptor) -> AccessResult<Resolution> {
    let name = expect_named(descriptor)?;
    expect_no_params(descriptor)?;

    if descriptor.is_static() {
        return registration.members()
            .static_field(name)
            .map(|field| Resolution::StaticField(field.clone()))
            .ok_or_else(|| AccessError::not_found(descriptor));
    }

    let field = match registration.type_info() {
        TypeInfo::Struct(info) => info.field(name)
            .map(|field| (field.index(), field.type_key())),
        // tuple struct fields are named by their declared position
        TypeInfo::TupleStruct(info) => name.parse::<usize>()
            .ok()
            .and_then(|position| info.field_at_position(position))
            .map(|field| (field.index(), field.type_key())),
        _ => None,
    };

    let (index, ty) = field.ok_or_else(|| AccessError::not_found(descriptor))?;
    Ok(Resolution::Field { index, ty })
}

fn resolve_element(registration: &TypeRegistration, descriptor: &MemberDescriptor) -> AccessResult<Resolution> {
    let item = registration.type_info()
        .item_type()
        .ok_or_else(|| AccessError::not_found(descriptor))?;

    let (sentinel, expected) = match descriptor.access() {
        Access::Read => (MemberName::ElementGet, vec![TypeKey::of::<usize>()]),
        Access::Write => (MemberName::ElementSet, vec![TypeKey::of::<usize>(), item]),
    };
    expect_sentinel(descriptor, &sentinel)?;

    if let Some(signature) = descriptor.parameter_types() {
        let compatible = signature.len() == expected.len()
            && expected.iter().zip(signature).all(|(declared, supplied)| declared.accepts(supplied));
        if !compatible {
            return Err(AccessError::not_found(descriptor));
        }
    }

    Ok(Resolution::Element { item })
}

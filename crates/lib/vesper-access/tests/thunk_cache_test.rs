use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Barrier,
};

use vesper_access::{
    cast, AccessError, AccessResult, Getter, MemberDescriptor, Synthesizer, Target, Thunk, ThunkCache,
};
use vesper_reflect::{type_keys, Args, MethodInfo, PropertyInfo, Reflect, TypeRegistry, TypeRegistryArc};

#[derive(Reflect, Clone)]
struct Sensor {
    id: u16,
    celsius: f32,
}

fn registry() -> TypeRegistryArc {
    let mut registry = TypeRegistry::new();
    registry.members_mut::<Sensor>()
        .add_method(MethodInfo::instance("calibrate", &type_keys![f32], |s: &mut Sensor, mut args: Args| {
            s.celsius += args.take::<f32>(0)?;
            Ok(())
        }))
        .add_method(MethodInfo::instance("calibrate", &type_keys![f32, f32], |s: &mut Sensor, mut args: Args| {
            s.celsius = s.celsius * args.take::<f32>(0)? + args.take::<f32>(1)?;
            Ok(())
        }));
    registry.into()
}

#[test]
fn repeated_requests_reuse_one_thunk() {
    let cache = ThunkCache::new();
    let synthesizer = Synthesizer::with_provider(registry());
    let descriptor = MemberDescriptor::field::<Sensor>("celsius");
    let synthesized = AtomicUsize::new(0);

    let request = || cache.get_or_create(&descriptor, |descriptor| {
        synthesized.fetch_add(1, Ordering::SeqCst);
        synthesizer.synthesize(descriptor)
    });

    let first = request().unwrap();
    let second = request().unwrap();
    let third = cache.get_or_synthesize(&descriptor.clone(), &synthesizer).unwrap();

    assert!(first.ptr_eq(&second));
    assert!(first.ptr_eq(&third));
    assert_eq!(synthesized.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn distinct_descriptors_get_distinct_entries() {
    let cache = ThunkCache::new();
    let synthesizer = Synthesizer::with_provider(registry());

    let descriptors = [
        MemberDescriptor::field::<Sensor>("id"),
        MemberDescriptor::field::<Sensor>("celsius"),
        MemberDescriptor::field::<Sensor>("celsius").boxed(),
        MemberDescriptor::field::<Sensor>("celsius").write().boxed(),
        MemberDescriptor::method::<Sensor>("calibrate").with_params(type_keys![f32]).boxed(),
        MemberDescriptor::method::<Sensor>("calibrate").with_params(type_keys![f32, f32]).boxed(),
    ];

    let thunks = descriptors.iter()
        .map(|descriptor| cache.get_or_synthesize(descriptor, &synthesizer).unwrap())
        .collect::<Vec<_>>();

    assert_eq!(cache.len(), descriptors.len());
    for (i, left) in thunks.iter().enumerate() {
        for right in &thunks[i + 1..] {
            assert!(!left.ptr_eq(right));
        }
    }

    let sensor = Sensor { id: 4, celsius: 21.5 };
    let Thunk::Getter(id) = &thunks[0] else {
        panic!("expected a getter");
    };
    let Thunk::Getter(celsius) = &thunks[1] else {
        panic!("expected a getter");
    };
    assert_eq!(cast::<u16>(id.get(Target::Ref(&sensor)).unwrap()).unwrap(), 4);
    assert_eq!(cast::<f32>(celsius.get(Target::Ref(&sensor)).unwrap()).unwrap(), 21.5);
}

#[test]
fn keys_differing_in_one_part_never_collide() {
    let cache = ThunkCache::new();
    let synthesized = AtomicUsize::new(0);
    let stub = |_: &MemberDescriptor| -> AccessResult<Thunk> {
        synthesized.fetch_add(1, Ordering::SeqCst);
        Ok(Getter::new(|_: Target<'_>| Ok(Box::new(()) as vesper_access::Value)).into())
    };

    let base = MemberDescriptor::method::<Sensor>("calibrate").with_params(type_keys![f32, u8]);
    let variants = [
        base.clone(),
        MemberDescriptor::method::<Sensor>("calibrate").with_params(type_keys![u8, f32]),
        base.clone().static_(),
        base.clone().boxed(),
        MemberDescriptor::property::<Sensor>("calibrate"),
        MemberDescriptor::method::<Sensor>("calibrate"),
        MemberDescriptor::method::<Sensor>("calibrate").with_params([]),
        MemberDescriptor::element::<Sensor>(),
        MemberDescriptor::element::<Sensor>().write(),
        MemberDescriptor::indexer::<Sensor>(),
        MemberDescriptor::indexer::<Sensor>().write(),
    ];

    for descriptor in &variants {
        cache.get_or_create(descriptor, stub).unwrap();
    }
    assert_eq!(synthesized.load(Ordering::SeqCst), variants.len());
    assert_eq!(cache.len(), variants.len());

    // an equal descriptor built separately hits the stored entry
    cache.get_or_create(&MemberDescriptor::method::<Sensor>("calibrate").with_params(type_keys![f32, u8]), stub).unwrap();
    assert_eq!(synthesized.load(Ordering::SeqCst), variants.len());
}

#[test]
fn failures_are_retried_once_metadata_appears() {
    let registry = registry();
    let cache = ThunkCache::new();
    let synthesizer = Synthesizer::with_provider(registry.clone());
    let descriptor = MemberDescriptor::property::<Sensor>("fahrenheit");

    let err = cache.get_or_synthesize(&descriptor, &synthesizer).unwrap_err();
    assert!(matches!(err, AccessError::NotFound { .. }));
    assert!(!cache.contains(&descriptor));

    registry.write()
        .members_mut::<Sensor>()
        .add_property(PropertyInfo::read_only("fahrenheit", |s: &Sensor| s.celsius * 9.0 / 5.0 + 32.0));

    let getter: Getter = cache.get_or_synthesize_as(&descriptor, &synthesizer).unwrap();
    let sensor = Sensor { id: 1, celsius: 100.0 };
    assert_eq!(cast::<f32>(getter.get(Target::Ref(&sensor)).unwrap()).unwrap(), 212.0);
    assert_eq!(cache.len(), 1);
}

#[test]
fn ambiguous_overloads_are_not_cached() {
    let cache = ThunkCache::new();
    let synthesizer = Synthesizer::with_provider(registry());
    let descriptor = MemberDescriptor::method::<Sensor>("calibrate").boxed();

    let err = cache.get_or_synthesize(&descriptor, &synthesizer).unwrap_err();
    assert!(matches!(err, AccessError::Ambiguous { candidates: 2, .. }));
    assert!(cache.is_empty());
}

#[test]
fn wrong_shape_is_reported() {
    let cache = ThunkCache::new();
    let synthesizer = Synthesizer::with_provider(registry());
    let descriptor = MemberDescriptor::field::<Sensor>("id");

    let err = cache.get_or_synthesize_as::<vesper_access::Setter>(&descriptor, &synthesizer).unwrap_err();
    assert!(matches!(err, AccessError::ShapeMismatch { .. }));
    // the getter itself was still stored
    assert!(cache.contains(&descriptor));
}

#[test]
fn concurrent_synthesis_stores_one_thunk() {
    const THREADS: usize = 8;

    let cache = ThunkCache::new();
    let synthesizer = Synthesizer::with_provider(registry());
    let descriptor = MemberDescriptor::field::<Sensor>("id");
    let barrier = Barrier::new(THREADS);
    let synthesized = AtomicUsize::new(0);

    let (cache_ref, synthesizer, descriptor_ref, barrier, synthesized_ref) =
        (&cache, &synthesizer, &descriptor, &barrier, &synthesized);
    let thunks = std::thread::scope(|scope| {
        let workers = (0..THREADS)
            .map(|_| scope.spawn(move || {
                barrier.wait();
                cache_ref.get_or_create(descriptor_ref, |descriptor| {
                    synthesized_ref.fetch_add(1, Ordering::SeqCst);
                    synthesizer.synthesize(descriptor)
                })
            }))
            .collect::<Vec<_>>();

        workers.into_iter()
            .map(|worker| worker.join().unwrap().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(cache.len(), 1);
    assert!(synthesized.load(Ordering::SeqCst) >= 1);

    let stored = cache.get(&descriptor).unwrap().unwrap();
    let sensor = Sensor { id: 12, celsius: 0.0 };
    for thunk in thunks {
        assert!(thunk.ptr_eq(&stored));
        let Thunk::Getter(getter) = thunk else {
            panic!("expected a getter");
        };
        assert_eq!(cast::<u16>(getter.get(Target::Ref(&sensor)).unwrap()).unwrap(), 12);
    }
}

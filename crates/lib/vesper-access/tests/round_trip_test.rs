use vesper_access::{
    cast, Constructor, ElementGetter, ElementSetter, Getter, IndexGetter, IndexSetter, Invoker,
    MemberDescriptor, ObjectRef, Setter, Synthesizer, Target, ThunkCache, Value, ValueHolder,
};
use vesper_reflect::{
    type_keys, Args, ConstructorInfo, IndexerInfo, MethodInfo, PropertyInfo, Reflect, ReflectError,
    StaticFieldInfo, TypeKey, TypeRegistry, TypeRegistryArc,
};

#[derive(Reflect, Clone, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Reflect, Clone, Debug, PartialEq)]
struct Pair(u8, String);

#[derive(Reflect, Clone)]
#[reflect(reference)]
struct Grid {
    cells: Vec<u32>,
    width: usize,
}

impl Grid {
    fn slot(&self, args: &Args) -> Result<usize, ReflectError> {
        let index = *args.get::<usize>(1)? * self.width + *args.get::<usize>(0)?;
        if index < self.cells.len() {
            Ok(index)
        } else {
            Err(ReflectError::IndexOutOfBounds { index, len: self.cells.len() })
        }
    }
}

fn registry() -> TypeRegistryArc {
    let mut registry = TypeRegistry::new();
    registry.register::<Pair>();
    registry.register::<Vec<u32>>();

    registry.members_mut::<Point>()
        .add_property(PropertyInfo::read_only("length_sq", |p: &Point| p.x * p.x + p.y * p.y))
        .add_property(PropertyInfo::read_write("left", |p: &Point| p.x, |p: &mut Point, x: i32| p.x = x))
        .add_property(PropertyInfo::static_read_only("dimensions", || 2u8))
        .add_method(MethodInfo::instance("translate", &type_keys![i32, i32], |p: &mut Point, mut args: Args| {
            p.x += args.take::<i32>(0)?;
            p.y += args.take::<i32>(1)?;
            Ok(())
        }))
        .add_method(MethodInfo::static_("origin", &[], |_| Ok(Point { x: 0, y: 0 })))
        .add_constructor(ConstructorInfo::new::<Point, _>(&type_keys![i32, i32], |mut args: Args| {
            Ok(Point { x: args.take(0)?, y: args.take(1)? })
        }))
        .add_static_field(StaticFieldInfo::new("scale", 2u32));

    registry.members_mut::<Grid>()
        .add_indexer(IndexerInfo::read_write(
            &type_keys![usize, usize],
            |grid: &Grid, args: Args| Ok(grid.cells[grid.slot(&args)?]),
            |grid: &mut Grid, args: Args, value: u32| {
                let slot = grid.slot(&args)?;
                grid.cells[slot] = value;
                Ok(())
            },
        ));

    registry.into()
}

fn fixture() -> (TypeRegistryArc, ThunkCache, Synthesizer) {
    let registry = registry();
    let synthesizer = Synthesizer::with_provider(registry.clone());
    (registry, ThunkCache::new(), synthesizer)
}

#[test]
fn field_thunks_match_direct_access() {
    let (_, cache, synthesizer) = fixture();
    let point = Point { x: 3, y: -4 };

    let getter: Getter = cache.get_or_synthesize_as(&MemberDescriptor::field::<Point>("y"), &synthesizer).unwrap();
    assert_eq!(cast::<i32>(getter.get(Target::Ref(&point)).unwrap()).unwrap(), point.y);

    let setter: Setter = cache.get_or_synthesize_as(&MemberDescriptor::field::<Point>("y").write().boxed(), &synthesizer).unwrap();
    let mut holder = ValueHolder::new(point.clone());
    setter.set(Target::Boxed(&mut holder), Box::new(9i32)).unwrap();
    assert_eq!(holder.unwrap::<Point>().unwrap(), Point { x: 3, y: 9 });
}

#[test]
fn tuple_struct_fields_are_addressed_by_position() {
    let (_, cache, synthesizer) = fixture();
    let pair = Pair(7, "seven".to_string());

    let getter: Getter = cache.get_or_synthesize_as(&MemberDescriptor::field::<Pair>("1"), &synthesizer).unwrap();
    assert_eq!(cast::<String>(getter.get(Target::Ref(&pair)).unwrap()).unwrap(), "seven");
}

#[test]
fn property_thunks_match_direct_access() {
    let (registry, cache, synthesizer) = fixture();
    let point = Point { x: 3, y: 4 };

    let direct = {
        let registry = registry.read();
        let members = registry.registration_of(TypeKey::of::<Point>()).unwrap().members();
        let property = members.properties_named("length_sq").next().unwrap();
        cast::<i32>(property.get(Some(&point)).unwrap()).unwrap()
    };

    let getter: Getter = cache.get_or_synthesize_as(&MemberDescriptor::property::<Point>("length_sq"), &synthesizer).unwrap();
    assert_eq!(cast::<i32>(getter.get(Target::Ref(&point)).unwrap()).unwrap(), direct);
    assert_eq!(direct, 25);

    let setter: Setter = cache.get_or_synthesize_as(&MemberDescriptor::property::<Point>("left").write().boxed(), &synthesizer).unwrap();
    let mut holder = ValueHolder::new(point);
    setter.set(Target::Boxed(&mut holder), Box::new(-1i32)).unwrap();
    assert_eq!(holder.downcast_ref::<Point>().unwrap().x, -1);

    let statics: Getter = cache.get_or_synthesize_as(&MemberDescriptor::property::<Point>("dimensions").static_(), &synthesizer).unwrap();
    assert_eq!(cast::<u8>(statics.get(Target::Static).unwrap()).unwrap(), 2);
}

#[test]
fn method_thunks_match_direct_calls() {
    let (registry, cache, synthesizer) = fixture();

    let mut direct = Point { x: 1, y: 1 };
    {
        let registry = registry.read();
        let members = registry.registration_of(TypeKey::of::<Point>()).unwrap().members();
        let translate = members.methods_named("translate").next().unwrap();
        translate.invoke(Some(&mut direct), vec![Box::new(2i32) as Value, Box::new(3i32)]).unwrap();
    }

    let descriptor = MemberDescriptor::method::<Point>("translate")
        .with_params(type_keys![i32, i32])
        .boxed();
    let invoker: Invoker = cache.get_or_synthesize_as(&descriptor, &synthesizer).unwrap();
    let mut holder = ValueHolder::new(Point { x: 1, y: 1 });
    let returned = invoker.invoke(Target::Boxed(&mut holder), vec![Box::new(2i32) as Value, Box::new(3i32)]).unwrap();

    assert!(returned.is::<()>());
    assert_eq!(holder.downcast_ref::<Point>(), Some(&direct));

    let origin: Invoker = cache.get_or_synthesize_as(&MemberDescriptor::method::<Point>("origin").static_(), &synthesizer).unwrap();
    let origin = cast::<Point>(origin.invoke(Target::Static, Vec::new()).unwrap()).unwrap();
    assert_eq!(origin, Point { x: 0, y: 0 });
}

#[test]
fn method_arguments_are_checked() {
    let (_, cache, synthesizer) = fixture();
    let descriptor = MemberDescriptor::method::<Point>("translate").boxed();
    let invoker: Invoker = cache.get_or_synthesize_as(&descriptor, &synthesizer).unwrap();
    let mut holder = ValueHolder::new(Point { x: 0, y: 0 });

    let err = invoker.invoke(Target::Boxed(&mut holder), vec![Box::new(1i32) as Value]).unwrap_err();
    assert_eq!(err, ReflectError::ArgumentCount { expected: 2, found: 1 });

    let err = invoker.invoke(Target::Boxed(&mut holder), vec![Box::new(1i32) as Value, Box::new(1u8)]).unwrap_err();
    assert!(matches!(err, ReflectError::IncompatibleArgument { .. }));
    assert_eq!(holder.downcast_ref::<Point>(), Some(&Point { x: 0, y: 0 }));
}

#[test]
fn constructor_thunk_builds_instances() {
    let (_, cache, synthesizer) = fixture();
    let descriptor = MemberDescriptor::constructor::<Point>().with_params(type_keys![i32, i32]);

    let constructor: Constructor = cache.get_or_synthesize_as(&descriptor, &synthesizer).unwrap();
    let point = cast::<Point>(constructor.construct(vec![Box::new(5i32) as Value, Box::new(6i32)]).unwrap()).unwrap();
    assert_eq!(point, Point { x: 5, y: 6 });
}

#[test]
fn static_field_thunks_share_one_slot() {
    let (_, cache, synthesizer) = fixture();
    let read = MemberDescriptor::field::<Point>("scale").static_();

    let getter: Getter = cache.get_or_synthesize_as(&read, &synthesizer).unwrap();
    let setter: Setter = cache.get_or_synthesize_as(&read.clone().write(), &synthesizer).unwrap();

    assert_eq!(cast::<u32>(getter.get(Target::Static).unwrap()).unwrap(), 2);
    setter.set(Target::Static, Box::new(5u32)).unwrap();
    assert_eq!(cast::<u32>(getter.get(Target::Static).unwrap()).unwrap(), 5);

    let err = setter.set(Target::Static, Box::new("five".to_string())).unwrap_err();
    assert!(matches!(err, ReflectError::IncompatibleArgument { .. }));
}

#[test]
fn element_thunks_read_and_write_lists() {
    let (_, cache, synthesizer) = fixture();
    let list = vec![10u32, 20, 30];

    let getter: ElementGetter = cache.get_or_synthesize_as(&MemberDescriptor::element::<Vec<u32>>(), &synthesizer).unwrap();
    assert_eq!(cast::<u32>(getter.get(Target::Ref(&list), 1).unwrap()).unwrap(), list[1]);
    assert_eq!(
        getter.get(Target::Ref(&list), 3).unwrap_err(),
        ReflectError::IndexOutOfBounds { index: 3, len: 3 },
    );

    let setter: ElementSetter = cache.get_or_synthesize_as(&MemberDescriptor::element::<Vec<u32>>().write().boxed(), &synthesizer).unwrap();
    let mut holder = ValueHolder::new(list);
    setter.set(Target::Boxed(&mut holder), 2, Box::new(99u32)).unwrap();
    assert_eq!(holder.unwrap::<Vec<u32>>().unwrap(), vec![10, 20, 99]);
}

#[test]
fn indexer_thunks_take_the_value_last() {
    let (_, cache, synthesizer) = fixture();
    let grid = ObjectRef::new(Grid { cells: vec![0; 6], width: 3 });

    let setter: IndexSetter = cache.get_or_synthesize_as(&MemberDescriptor::indexer::<Grid>().write(), &synthesizer).unwrap();
    setter.set(Target::Shared(&grid), vec![Box::new(2usize) as Value, Box::new(1usize), Box::new(42u32)]).unwrap();

    let getter: IndexGetter = cache.get_or_synthesize_as(&MemberDescriptor::indexer::<Grid>(), &synthesizer).unwrap();
    let value = getter.get(Target::Shared(&grid), vec![Box::new(2usize) as Value, Box::new(1usize)]).unwrap();
    assert_eq!(cast::<u32>(value).unwrap(), 42);
    assert_eq!(grid.with(|grid: &Grid| grid.cells[5]), Some(42));

    let err = setter.set(Target::Shared(&grid), vec![Box::new(0usize) as Value, Box::new(0usize), Box::new(1u8)]).unwrap_err();
    assert!(matches!(err, ReflectError::IncompatibleArgument { .. }));
}

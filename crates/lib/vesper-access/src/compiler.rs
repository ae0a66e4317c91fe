use vesper_reflect::{
    Args, Array, Reflect, ReflectError, ReflectMut, ReflectRef, ReflectResult, Value,
};

use crate::{
    AccessError, AccessResult, ReceiverKind, ResolvedMember, Resolution, Shape, Target, Thunk,
    Getter, Setter, Invoker, Constructor, ElementGetter, ElementSetter, IndexGetter, IndexSetter,
};

/// Turns a resolved member into a callable of the requested shape.
pub trait ThunkCompiler: Send + Sync {
    fn compile(&self, member: &ResolvedMember, shape: &Shape) -> AccessResult<Thunk>;
}

/// Default compiler: composes closures that capture everything the member
/// needs (field index, accessor, body) once, so a call does no lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosureCompiler;

impl ThunkCompiler for ClosureCompiler {
    fn compile(&self, member: &ResolvedMember, shape: &Shape) -> AccessResult<Thunk> {
        let target = member.target();
        let receiver = member.receiver();

        let thunk: Thunk = match (shape, member.resolution().clone()) {
            (Shape::Getter, Resolution::Field { index, .. }) => Getter::new(move |instance: Target<'_>| {
                instance.read(receiver, target, |instance| Ok(field_at(instance, index)?.clone_value()))
            }).into(),
            (Shape::Setter, Resolution::Field { index, .. }) => Setter::new(move |instance: Target<'_>, value: Value| {
                instance.write(receiver, target, |instance| field_at_mut(instance, index)?.set(value))
            }).into(),

            (Shape::Getter, Resolution::StaticField(field)) => Getter::new(move |instance: Target<'_>| {
                instance.expect_static()?;
                Ok(field.get())
            }).into(),
            (Shape::Setter, Resolution::StaticField(field)) => Setter::new(move |instance: Target<'_>, value: Value| {
                instance.expect_static()?;
                field.set(value)
            }).into(),

            (Shape::Getter, Resolution::Property(property)) => {
                let getter = property.getter()
                    .cloned()
                    .ok_or_else(|| unsupported(member, shape))?;
                if receiver == ReceiverKind::Static {
                    Getter::new(move |instance: Target<'_>| {
                        instance.expect_static()?;
                        getter(None)
                    }).into()
                } else {
                    Getter::new(move |instance: Target<'_>| {
                        instance.read(receiver, target, |instance| getter(Some(instance)))
                    }).into()
                }
            }
            (Shape::Setter, Resolution::Property(property)) => {
                let setter = property.setter()
                    .cloned()
                    .ok_or_else(|| unsupported(member, shape))?;
                if receiver == ReceiverKind::Static {
                    Setter::new(move |instance: Target<'_>, value: Value| {
                        instance.expect_static()?;
                        setter(None, value)
                    }).into()
                } else {
                    Setter::new(move |instance: Target<'_>, value: Value| {
                        instance.write(receiver, target, |instance| setter(Some(instance), value))
                    }).into()
                }
            }

            (Shape::Invoker, Resolution::Method(method)) => {
                if receiver == ReceiverKind::Static {
                    Invoker::new(move |instance: Target<'_>, args: Vec<Value>| {
                        instance.expect_static()?;
                        method.invoke(None, args)
                    }).into()
                } else {
                    Invoker::new(move |instance: Target<'_>, args: Vec<Value>| {
                        // arguments are checked before the receiver is locked
                        let args = Args::checked(method.params(), args)?;
                        instance.write(receiver, target, |instance| (method.body())(Some(instance), args))
                    }).into()
                }
            }

            (Shape::Constructor, Resolution::Constructor(constructor)) => {
                Constructor::new(move |args: Vec<Value>| constructor.construct(args)).into()
            }

            (Shape::ElementGetter, Resolution::Element { .. }) => ElementGetter::new(move |instance: Target<'_>, index: usize| {
                instance.read(receiver, target, |instance| Ok(element_at(instance, index)?.clone_value()))
            }).into(),
            (Shape::ElementSetter, Resolution::Element { .. }) => ElementSetter::new(move |instance: Target<'_>, index: usize, value: Value| {
                instance.write(receiver, target, |instance| element_at_mut(instance, index)?.set(value))
            }).into(),

            (Shape::IndexGetter, Resolution::Indexer(indexer)) => {
                let getter = indexer.getter()
                    .cloned()
                    .ok_or_else(|| unsupported(member, shape))?;
                IndexGetter::new(move |instance: Target<'_>, args: Vec<Value>| {
                    let args = Args::checked(indexer.params(), args)?;
                    instance.read(receiver, target, |instance| getter(instance, args))
                }).into()
            }
            (Shape::IndexSetter, Resolution::Indexer(indexer)) => {
                let setter = indexer.setter()
                    .cloned()
                    .ok_or_else(|| unsupported(member, shape))?;
                IndexSetter::new(move |instance: Target<'_>, mut args: Vec<Value>| {
                    let expected = indexer.params().len() + 1;
                    if args.len() != expected {
                        return Err(ReflectError::ArgumentCount { expected, found: args.len() });
                    }

                    // the value travels as the trailing argument
                    let value = args.pop().ok_or(ReflectError::ArgumentCount { expected, found: 0 })?;
                    if !indexer.value_type().accepts(&value.type_key()) {
                        return Err(ReflectError::IncompatibleArgument {
                            expected: indexer.value_type().name(),
                            found: value.type_name(),
                        });
                    }

                    let args = Args::checked(indexer.params(), args)?;
                    instance.write(receiver, target, |instance| setter(instance, args, value))
                }).into()
            }

            _ => return Err(unsupported(member, shape)),
        };

        Ok(thunk)
    }
}

fn unsupported(member: &ResolvedMember, shape: &Shape) -> AccessError {
    glog::debug!("cannot compile {:?} of `{}` as a {} thunk", member.resolution(), member.target(), shape);
    AccessError::InvalidTargetKind {
        target: member.target(),
        member: format!("{:?}", member.resolution()),
        reason: "member does not support this shape",
    }
}

fn field_at(instance: &dyn Reflect, index: usize) -> ReflectResult<&dyn Reflect> {
    let (field, len) = match instance.reflect_ref() {
        ReflectRef::Struct(fields) => (fields.field_at(index), fields.num_fields()),
        ReflectRef::TupleStruct(fields) => (fields.field_at(index), fields.num_fields()),
        _ => (None, 0),
    };
    field.ok_or(ReflectError::IndexOutOfBounds { index, len })
}

fn field_at_mut(instance: &mut dyn Reflect, index: usize) -> ReflectResult<&mut dyn Reflect> {
    match instance.reflect_mut() {
        ReflectMut::Struct(fields) => {
            let len = fields.num_fields();
            fields.field_at_mut(index).ok_or(ReflectError::IndexOutOfBounds { index, len })
        }
        ReflectMut::TupleStruct(fields) => {
            let len = fields.num_fields();
            fields.field_at_mut(index).ok_or(ReflectError::IndexOutOfBounds { index, len })
        }
        _ => Err(ReflectError::IndexOutOfBounds { index, len: 0 }),
    }
}

fn element_at(instance: &dyn Reflect, index: usize) -> ReflectResult<&dyn Reflect> {
    let found = instance.type_name();
    let array: &dyn Array = match instance.reflect_ref() {
        ReflectRef::Array(array) => array,
        ReflectRef::List(list) => list.as_array(),
        _ => return Err(ReflectError::incompatible::<dyn Array>(found)),
    };
    array.get(index).ok_or(ReflectError::IndexOutOfBounds { index, len: array.len() })
}

fn element_at_mut(instance: &mut dyn Reflect, index: usize) -> ReflectResult<&mut dyn Reflect> {
    let found = instance.type_name();
    match instance.reflect_mut() {
        ReflectMut::Array(array) => {
            let len = array.len();
            array.get_mut(index).ok_or(ReflectError::IndexOutOfBounds { index, len })
        }
        ReflectMut::List(list) => {
            let len = list.len();
            list.get_mut(index).ok_or(ReflectError::IndexOutOfBounds { index, len })
        }
        _ => Err(ReflectError::incompatible::<dyn Array>(found)),
    }
}

// use log macros.
#[macro_use]
extern crate log as _log;

use vesper_facade::{
    access::{cast, MemberDescriptor, ObjectRef, Target, Value, ValueHolder},
    core::{console, log},
    reflect::{type_keys, Args, ConstructorInfo, MethodInfo, PropertyInfo, Reflect},
    Reflector,
};

#[derive(Reflect, Clone, Debug)]
struct Particle {
    position: [f32; 2],
    velocity: [f32; 2],
    mass: f32,
}

#[derive(Reflect, Clone, Debug)]
#[reflect(reference)]
struct Emitter {
    name: String,
    spawned: u32,
}

fn register(reflector: &Reflector) {
    reflector.members::<Particle, _>(|members| {
        members
            .add_property(PropertyInfo::read_only("momentum", |p: &Particle| {
                p.mass * (p.velocity[0] * p.velocity[0] + p.velocity[1] * p.velocity[1]).sqrt()
            }))
            .add_method(MethodInfo::instance("step", &type_keys![f32], |p: &mut Particle, mut args: Args| {
                let dt = args.take::<f32>(0)?;
                p.position[0] += p.velocity[0] * dt;
                p.position[1] += p.velocity[1] * dt;
                Ok(())
            }))
            .add_constructor(ConstructorInfo::new::<Particle, _>(&type_keys![f32], |mut args: Args| {
                Ok(Particle { position: [0.0; 2], velocity: [1.0, 0.5], mass: args.take(0)? })
            }));
    });

    reflector.register::<Emitter>();
}

fn main() -> anyhow::Result<()> {
    let console_vars = console::from_args()?;
    log::init_log(console_vars.log_config())?;

    let reflector = Reflector::new();
    register(&reflector);

    let particle = reflector.create_instance::<Particle>(vec![Box::new(2.0f32) as Value])?;
    let mut particle = ValueHolder::new(particle);

    // the same step thunk is reused on every iteration
    for _ in 0..3 {
        reflector.call_method(Target::Boxed(&mut particle), "step", vec![Box::new(0.5f32) as Value])?;
    }
    let momentum = cast::<f32>(reflector.get_property(Target::Boxed(&mut particle), "momentum")?)?;
    info!("particle after 3 steps: {:?}, momentum {:.3}", particle.get(), momentum);

    let emitter = ObjectRef::new(Emitter { name: "fountain".to_string(), spawned: 0 });
    let spawned = reflector.setter(&MemberDescriptor::field::<Emitter>("spawned").write())?;
    for count in 1..=4u32 {
        spawned.set(Target::Shared(&emitter), Box::new(count))?;
    }
    info!("emitter after spawning: {:?}", emitter.read());

    // value types cannot be mutated without a holder
    if let Err(err) = reflector.set_field(Target::Ref(particle.get()), "mass", Box::new(1.0f32)) {
        warn!("rejected: {}", err);
    }

    debug!("thunk cache: {:?}", reflector.cache());
    reflector.dispose();

    Ok(())
}

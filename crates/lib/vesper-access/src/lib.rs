//! Cached dynamic member access.
//!
//! A [`MemberDescriptor`] names one operation on one member of a reflected
//! type. The [`ThunkCache`] maps descriptors to [`Thunk`]s: callables with a
//! fixed calling convention per [`Shape`]. On a miss the [`Synthesizer`]
//! resolves the member through a [`MetadataProvider`] and builds the thunk
//! with a [`ThunkCompiler`], so repeated requests reuse one stored thunk and
//! invoking it performs no lookups.
//!
//! ```ignore
//! let registry = TypeRegistryArc::default();
//! registry.write().register::<Point>();
//!
//! let cache = ThunkCache::new();
//! let synthesizer = Synthesizer::with_provider(registry);
//!
//! let getter: Getter = cache.get_or_synthesize_as(&MemberDescriptor::field::<Point>("x"), &synthesizer)?;
//! let x = cast::<i32>(getter.get(Target::Ref(&point))?)?;
//! ```

extern crate log as glog;

mod error;
mod descriptor;
mod object;
mod holder;
mod target;
mod thunk;
mod provider;
mod compiler;
mod synth;
mod cache;

pub use error::{AccessError, AccessResult};
pub use descriptor::{MemberDescriptor, MemberCategory, MemberName, Access, ReceiverKind};
pub use object::ObjectRef;
pub use holder::ValueHolder;
pub use target::Target;
pub use thunk::{
    Thunk, Shape,
    Getter, Setter, Invoker, Constructor,
    ElementGetter, ElementSetter, IndexGetter, IndexSetter,
};
pub use provider::{MetadataProvider, ResolvedMember, Resolution, select_overload};
pub use compiler::{ThunkCompiler, ClosureCompiler};
pub use synth::Synthesizer;
pub use cache::ThunkCache;

pub use vesper_reflect::{cast, Value};

mod registration;
mod registry;
mod shared;

pub use registration::{TypeRegistration, GetTypeRegistration};
pub use registry::TypeRegistry;
pub use shared::TypeRegistryArc;

extern crate log as glog;

pub mod core {
    pub use vesper_core::*;
}

pub mod reflect {
    pub use vesper_reflect::*;
}

pub mod access {
    pub use vesper_access::*;
}

mod reflector;

pub use reflector::{Reflector, global};

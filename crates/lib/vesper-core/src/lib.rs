extern crate log as glog; // to avoid name collision with my log module

pub mod log;
pub mod console;
pub mod result;

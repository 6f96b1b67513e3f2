//! Request loader implementations

pub mod json_loader;

pub use json_loader::*;

//! Schema domain module - the interface description handed over by the compiler front-end
//!
//! The types here mirror the descriptor shape emitted by the front-end closely
//! enough that templates can navigate them by the same field names. They are
//! plain data: the generator never validates or rewrites them.

pub mod request;
pub mod types;

pub use request::*;
pub use types::*;

//! Generation domain module - turns schema files into rendered outputs
//!
//! Templates are discovered once, then rendered in passes: one pass per
//! service or one per file depending on the configured mode. Within a pass
//! every template renders concurrently. Outputs from all passes are merged by
//! filename before they leave this module.

pub mod context;
pub mod encoder;
pub mod errors;
pub mod filename;
pub mod helpers;
pub mod locator;
pub mod merge;
pub mod options;
pub mod orchestrator;
pub mod renderer;
pub mod traits;
pub mod types;
pub mod utils;

pub use context::*;
pub use encoder::*;
pub use errors::*;
pub use locator::*;
pub use merge::*;
pub use orchestrator::*;
pub use traits::*;
pub use types::*;

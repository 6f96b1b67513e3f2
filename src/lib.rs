//! protoc-gen-tera
//!
//! A protoc plugin that renders a directory of Tera templates against the
//! compiled schema. Template paths are templates too, so a single template
//! can fan out into one output file per service.

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;
pub mod schema;

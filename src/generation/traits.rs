//! Port interfaces for the generation domain

use serde_json::Value as JsonValue;
use tera::Tera;

use crate::schema::{FileSchema, MessageSchema};

/// Reads the custom per-message option blob out of a message's schema extensions
pub trait OptionReader: Send + Sync {
    /// Return the option blob for a message, or `None` when the message does not carry it
    fn read(&self, message: &MessageSchema) -> Option<JsonValue>;
}

/// Named functions made available to template text
pub trait HelperLibrary: Send + Sync {
    /// Register every helper on a template engine instance.
    ///
    /// Called on each engine before it parses anything.
    fn register(&self, tera: &mut Tera);

    /// Record file-scoped type paths so helpers can resolve relative names.
    ///
    /// Called once per schema file, before any template for that file renders.
    fn init_path_map(&self, file: &FileSchema);
}

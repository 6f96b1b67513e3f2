//! Custom per-message option extraction

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::core::config::DEFAULT_OPTION_EXTENSION;
use crate::generation::OptionReader;
use crate::schema::{FileSchema, MessageSchema};

/// Message name to opaque option blob
pub type CustomOptionMap = BTreeMap<String, JsonValue>;

/// Reads one named extension from `MessageOptions.extensions`
#[derive(Debug, Clone)]
pub struct ExtensionOptionReader {
    extension: String,
}

impl ExtensionOptionReader {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl Default for ExtensionOptionReader {
    fn default() -> Self {
        Self::new(DEFAULT_OPTION_EXTENSION)
    }
}

impl OptionReader for ExtensionOptionReader {
    fn read(&self, message: &MessageSchema) -> Option<JsonValue> {
        message
            .options
            .as_ref()?
            .extensions
            .get(&self.extension)
            .filter(|v| !v.is_null())
            .cloned()
    }
}

/// Collect the option blobs of every top-level message in a file.
///
/// Messages without the extension are left out of the map.
pub fn collect_options(file: &FileSchema, reader: &dyn OptionReader) -> CustomOptionMap {
    file.message_type
        .iter()
        .filter_map(|message| reader.read(message).map(|blob| (message.name.clone(), blob)))
        .collect()
}

//! Descriptor types for files, messages, services and enums

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// A compiled interface file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSchema {
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub syntax: String,
    #[serde(default)]
    pub dependency: Vec<String>,
    #[serde(default)]
    pub message_type: Vec<MessageSchema>,
    #[serde(default)]
    pub enum_type: Vec<EnumSchema>,
    #[serde(default)]
    pub service: Vec<ServiceSchema>,
    #[serde(default)]
    pub options: FileOptions,
}

impl FileSchema {
    /// Fully-qualified prefix for types declared at the top of this file,
    /// e.g. `.acme.users` (or the empty string for files without a package)
    pub fn type_prefix(&self) -> String {
        if self.package.is_empty() {
            String::new()
        } else {
            format!(".{}", self.package)
        }
    }
}

/// File-level options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_package: Option<String>,
    #[serde(default)]
    pub extensions: BTreeMap<String, JsonValue>,
}

/// A message definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageSchema {
    pub name: String,
    #[serde(default)]
    pub field: Vec<FieldSchema>,
    #[serde(default)]
    pub nested_type: Vec<MessageSchema>,
    #[serde(default)]
    pub enum_type: Vec<EnumSchema>,
    #[serde(default)]
    pub options: Option<MessageOptions>,
    #[serde(default)]
    pub leading_comments: Option<String>,
}

/// Message-level options, including any schema extensions attached to the message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageOptions {
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub map_entry: bool,
    /// Extension values keyed by the extension's fully-qualified name
    #[serde(default)]
    pub extensions: BTreeMap<String, JsonValue>,
}

/// Field cardinality
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLabel {
    #[default]
    Optional,
    Required,
    Repeated,
}

/// A single message field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub number: i32,
    #[serde(default)]
    pub label: FieldLabel,
    /// Scalar type name (`string`, `int64`, ...) or `message` / `enum`
    #[serde(rename = "type")]
    pub field_type: String,
    /// Fully-qualified type for message and enum fields, e.g. `.acme.users.User`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_name: Option<String>,
    #[serde(default)]
    pub leading_comments: Option<String>,
}

/// An enum definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumSchema {
    pub name: String,
    #[serde(default)]
    pub value: Vec<EnumValueSchema>,
    #[serde(default)]
    pub leading_comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumValueSchema {
    pub name: String,
    pub number: i32,
}

/// A service definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSchema {
    pub name: String,
    #[serde(default)]
    pub method: Vec<MethodSchema>,
    #[serde(default)]
    pub leading_comments: Option<String>,
}

/// An RPC method on a service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodSchema {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
    #[serde(default)]
    pub leading_comments: Option<String>,
}

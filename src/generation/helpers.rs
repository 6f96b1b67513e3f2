//! Default helper library exposed to templates
//!
//! Casing filters are stateless. The type helpers read a path map that is
//! filled once per schema file through [`HelperLibrary::init_path_map`] and
//! then only read while that file's templates render.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tera::{Tera, Value};

use crate::generation::HelperLibrary;
use crate::schema::{EnumSchema, FileSchema, MessageSchema};

/// Kind of a registered type path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Message,
    Enum,
    Service,
}

/// Where a fully-qualified type was declared
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeLocation {
    pub name: String,
    pub full_name: String,
    pub package: String,
    pub file: String,
    pub kind: TypeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_comments: Option<String>,
}

#[derive(Debug, Default)]
struct PathMap {
    types: HashMap<String, TypeLocation>,
    /// Package of the file whose templates are currently rendering
    package: String,
}

impl PathMap {
    fn resolve(&self, name: &str) -> Option<&TypeLocation> {
        if name.starts_with('.') {
            return self.types.get(name);
        }
        if !self.package.is_empty() {
            if let Some(found) = self.types.get(&format!(".{}.{}", self.package, name)) {
                return Some(found);
            }
        }
        self.types.get(&format!(".{name}"))
    }
}

/// Built-in helpers: casing filters plus type lookups backed by the path map
#[derive(Debug, Clone, Default)]
pub struct ProtoHelpers {
    state: Arc<RwLock<PathMap>>,
}

impl ProtoHelpers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a registered type by fully-qualified or package-relative name
    pub fn lookup(&self, name: &str) -> Option<TypeLocation> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.resolve(name).cloned()
    }

    /// Number of registered type paths
    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HelperLibrary for ProtoHelpers {
    fn register(&self, tera: &mut Tera) {
        tera.register_filter("camel_case", case_filter("camel_case", |s| s.to_upper_camel_case()));
        tera.register_filter(
            "lower_camel_case",
            case_filter("lower_camel_case", |s| s.to_lower_camel_case()),
        );
        tera.register_filter("snake_case", case_filter("snake_case", |s| s.to_snake_case()));
        tera.register_filter("kebab_case", case_filter("kebab_case", |s| s.to_kebab_case()));
        tera.register_filter(
            "shouty_snake_case",
            case_filter("shouty_snake_case", |s| s.to_shouty_snake_case()),
        );
        tera.register_filter("upper_first", case_filter("upper_first", upper_first));
        tera.register_filter("lower_first", case_filter("lower_first", lower_first));
        tera.register_filter("short_type", case_filter("short_type", short_type));

        let state = Arc::clone(&self.state);
        tera.register_filter(
            "trim_package",
            move |value: &Value, _: &HashMap<String, Value>| {
                let name = string_value("trim_package", value)?;
                let state = state.read().unwrap_or_else(PoisonError::into_inner);
                Ok(Value::String(trim_package(&name, &state.package)))
            },
        );

        let state = Arc::clone(&self.state);
        tera.register_function("lookup_type", move |args: &HashMap<String, Value>| {
            let name = name_arg("lookup_type", args)?;
            let state = state.read().unwrap_or_else(PoisonError::into_inner);
            let location = state
                .resolve(&name)
                .ok_or_else(|| tera::Error::msg(format!("Unknown type `{name}`")))?;
            Ok(tera::to_value(location)?)
        });

        let state = Arc::clone(&self.state);
        tera.register_function("leading_comment", move |args: &HashMap<String, Value>| {
            let name = name_arg("leading_comment", args)?;
            let state = state.read().unwrap_or_else(PoisonError::into_inner);
            let location = state
                .resolve(&name)
                .ok_or_else(|| tera::Error::msg(format!("Unknown type `{name}`")))?;
            Ok(Value::String(
                location.leading_comments.clone().unwrap_or_default(),
            ))
        });
    }

    fn init_path_map(&self, file: &FileSchema) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let prefix = file.type_prefix();

        for message in &file.message_type {
            register_message(&mut state.types, file, &prefix, message);
        }
        for enumeration in &file.enum_type {
            register_enum(&mut state.types, file, &prefix, enumeration);
        }
        for service in &file.service {
            let full_name = format!("{prefix}.{}", service.name);
            state.types.insert(
                full_name.clone(),
                TypeLocation {
                    name: service.name.clone(),
                    full_name,
                    package: file.package.clone(),
                    file: file.name.clone(),
                    kind: TypeKind::Service,
                    leading_comments: service.leading_comments.clone(),
                },
            );
        }

        state.package = file.package.clone();
        tracing::debug!(file = %file.name, types = state.types.len(), "Initialized path map");
    }
}

fn register_message(
    types: &mut HashMap<String, TypeLocation>,
    file: &FileSchema,
    scope: &str,
    message: &MessageSchema,
) {
    let full_name = format!("{scope}.{}", message.name);
    for nested in &message.nested_type {
        register_message(types, file, &full_name, nested);
    }
    for enumeration in &message.enum_type {
        register_enum(types, file, &full_name, enumeration);
    }
    types.insert(
        full_name.clone(),
        TypeLocation {
            name: message.name.clone(),
            full_name,
            package: file.package.clone(),
            file: file.name.clone(),
            kind: TypeKind::Message,
            leading_comments: message.leading_comments.clone(),
        },
    );
}

fn register_enum(
    types: &mut HashMap<String, TypeLocation>,
    file: &FileSchema,
    scope: &str,
    enumeration: &EnumSchema,
) {
    let full_name = format!("{scope}.{}", enumeration.name);
    types.insert(
        full_name.clone(),
        TypeLocation {
            name: enumeration.name.clone(),
            full_name,
            package: file.package.clone(),
            file: file.name.clone(),
            kind: TypeKind::Enum,
            leading_comments: enumeration.leading_comments.clone(),
        },
    );
}

fn case_filter(
    filter: &'static str,
    convert: fn(&str) -> String,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static {
    move |value: &Value, _: &HashMap<String, Value>| {
        let input = string_value(filter, value)?;
        Ok(Value::String(convert(&input)))
    }
}

fn string_value(filter: &str, value: &Value) -> tera::Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| tera::Error::msg(format!("Filter `{filter}` expects a string, got `{value}`")))
}

fn name_arg(function: &str, args: &HashMap<String, Value>) -> tera::Result<String> {
    args.get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            tera::Error::msg(format!("Function `{function}` requires a string `name` argument"))
        })
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn short_type(s: &str) -> String {
    s.rsplit('.').next().unwrap_or(s).to_string()
}

fn trim_package(name: &str, package: &str) -> String {
    if !package.is_empty() {
        if let Some(rest) = name.strip_prefix(&format!(".{package}.")) {
            return rest.to_string();
        }
    }
    name.trim_start_matches('.').to_string()
}

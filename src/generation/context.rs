//! Render context - the data bag handed to every template evaluation
//!
//! A [`FileScope`] holds what is computed once per schema file (option map,
//! enums, path-map registration). A [`ContextBuilder`] binds a file scope to
//! one schema unit (the whole file, or a single service) and stamps out a fresh
//! [`RenderContext`] for each template instantiation.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::config::GeneratorConfig;
use crate::generation::options::{CustomOptionMap, collect_options};
use crate::generation::utils::dir_name;
use crate::generation::{GenerationError, HelperLibrary, OptionReader, TemplateUnit};
use crate::schema::{EnumSchema, FileSchema, ServiceSchema};

/// Build-time metadata captured once per invocation
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub date: DateTime<Local>,
    pub hostname: String,
    pub user: String,
    pub pwd: String,
    /// Working directory relative to `$GOPATH/src`, empty outside of it
    pub go_pwd: String,
}

impl BuildInfo {
    /// Gather metadata from the running environment
    pub fn collect() -> Result<Self, GenerationError> {
        let hostname = sysinfo::System::host_name().ok_or_else(|| {
            GenerationError::EnvironmentError("cannot determine hostname".to_string())
        })?;
        let pwd = std::env::current_dir().map_err(|e| {
            GenerationError::EnvironmentError(format!("cannot determine working directory: {e}"))
        })?;
        let go_pwd = std::env::var_os("GOPATH")
            .filter(|gopath| !gopath.is_empty())
            .map(|gopath| relative_to_gopath(&pwd, Path::new(&gopath)))
            .unwrap_or_default();

        Ok(Self {
            date: Local::now(),
            hostname,
            user: std::env::var("USER").unwrap_or_default(),
            pwd: pwd.to_string_lossy().to_string(),
            go_pwd,
        })
    }
}

fn relative_to_gopath(pwd: &Path, gopath: &Path) -> String {
    pwd.strip_prefix(gopath.join("src"))
        .map(|rel| rel.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Per-file data shared by every pass over that file
#[derive(Debug, Clone)]
pub struct FileScope {
    file: Arc<FileSchema>,
    enums: Arc<Vec<EnumSchema>>,
    options: Arc<CustomOptionMap>,
}

impl FileScope {
    /// Register the file's type paths with the helper library and extract its option map.
    ///
    /// Must run before any template for this file renders.
    pub fn prepare(
        file: FileSchema,
        reader: &dyn OptionReader,
        helpers: &dyn HelperLibrary,
    ) -> Self {
        helpers.init_path_map(&file);
        let options = collect_options(&file, reader);
        tracing::debug!(file = %file.name, options = options.len(), "Prepared file scope");

        Self {
            enums: Arc::new(file.enum_type.clone()),
            options: Arc::new(options),
            file: Arc::new(file),
        }
    }

    pub fn file(&self) -> &FileSchema {
        &self.file
    }

    pub fn options(&self) -> &CustomOptionMap {
        &self.options
    }
}

/// The data bag a template sees
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub build_date: DateTime<Local>,
    pub build_hostname: String,
    pub build_user: String,
    pub go_pwd: String,
    pub pwd: String,
    pub debug: bool,
    pub destination_dir: String,
    pub file: Arc<FileSchema>,
    pub raw_filename: String,
    filename: String,
    pub template_dir: String,
    pub service: Option<Arc<ServiceSchema>>,
    #[serde(rename = "enum")]
    pub enums: Arc<Vec<EnumSchema>>,
    pub options: Arc<CustomOptionMap>,
    /// Directory of the schema file's name
    pub path: String,
}

impl RenderContext {
    /// Resolved output filename; empty until the filename pass has run
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Record the resolved filename. Only the first call has any effect.
    pub fn set_filename(&mut self, filename: String) {
        if self.filename.is_empty() {
            self.filename = filename;
        } else {
            tracing::warn!(
                template = %self.raw_filename,
                filename = %self.filename,
                "Ignoring attempt to reset resolved filename"
            );
        }
    }

    /// Convert into a Tera context
    pub fn to_tera_context(&self) -> Result<tera::Context, tera::Error> {
        tera::Context::from_serialize(self)
    }
}

/// Builds fresh render contexts for one schema unit
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    build: Arc<BuildInfo>,
    scope: FileScope,
    service: Option<Arc<ServiceSchema>>,
    template_dir: PathBuf,
    destination_dir: String,
    debug: bool,
}

impl ContextBuilder {
    pub fn new(
        build: Arc<BuildInfo>,
        scope: FileScope,
        service: Option<ServiceSchema>,
        config: &GeneratorConfig,
    ) -> Self {
        Self {
            build,
            scope,
            service: service.map(Arc::new),
            template_dir: config.template_dir.clone(),
            destination_dir: config.destination_dir.clone(),
            debug: config.debug,
        }
    }

    pub fn file(&self) -> &FileSchema {
        self.scope.file()
    }

    pub fn service(&self) -> Option<&ServiceSchema> {
        self.service.as_deref()
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// A new context for one template, with an empty filename
    pub fn build(&self, unit: &TemplateUnit) -> RenderContext {
        RenderContext {
            build_date: self.build.date,
            build_hostname: self.build.hostname.clone(),
            build_user: self.build.user.clone(),
            go_pwd: self.build.go_pwd.clone(),
            pwd: self.build.pwd.clone(),
            debug: self.debug,
            destination_dir: self.destination_dir.clone(),
            file: Arc::clone(&self.scope.file),
            raw_filename: unit.as_str().to_string(),
            filename: String::new(),
            template_dir: self.template_dir.to_string_lossy().to_string(),
            service: self.service.clone(),
            enums: Arc::clone(&self.scope.enums),
            options: Arc::clone(&self.scope.options),
            path: dir_name(&self.scope.file.name),
        }
    }
}

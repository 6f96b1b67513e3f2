//! Template discovery - finds every `.tmpl` file below the template root

use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::generation::GenerationError;

/// Suffix that marks a file as a template; stripped from derived output paths
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// A discovered template, identified by its path relative to the template root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateUnit(String);

impl TemplateUnit {
    pub fn new(relative_path: impl Into<String>) -> Self {
        Self(relative_path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Walks a template root and collects template units
#[derive(Debug, Clone)]
pub struct TemplateLocator {
    root: PathBuf,
    debug: bool,
}

impl TemplateLocator {
    pub fn new(root: impl Into<PathBuf>, debug: bool) -> Self {
        Self {
            root: root.into(),
            debug,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect every template below the root, at any depth.
    ///
    /// Any walk error (missing root, unreadable directory) aborts discovery.
    pub fn discover(&self) -> Result<Vec<TemplateUnit>, GenerationError> {
        let mut templates = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|source| GenerationError::DiscoveryError {
                root: self.root.clone(),
                source,
            })?;

            if entry.file_type().is_dir() {
                continue;
            }
            let is_template = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(TEMPLATE_SUFFIX));
            if !is_template {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let unit = TemplateUnit::new(relative.to_string_lossy());

            if self.debug {
                tracing::info!(template = %unit, "new template");
            } else {
                tracing::debug!(template = %unit, "new template");
            }
            templates.push(unit);
        }

        Ok(templates)
    }
}

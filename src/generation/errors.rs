//! Error types for the generation domain

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Cannot get templates from {}: {source}", root.display())]
    DiscoveryError {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to resolve output filename for template '{template}': {source}")]
    FilenameError {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to render template '{template}': {source}")]
    RenderError {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("Task '{task}' failed: {message}")]
    TaskFailed { task: String, message: String },

    #[error("Environment error: {0}")]
    EnvironmentError(String),
}

impl GenerationError {
    /// Template the error is attributed to, when there is one
    pub fn template(&self) -> Option<&str> {
        match self {
            Self::FilenameError { template, .. }
            | Self::RenderError { template, .. }
            | Self::TaskFailed { task: template, .. } => Some(template),
            _ => None,
        }
    }
}

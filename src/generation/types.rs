//! Core types for the generation domain

use serde::{Deserialize, Serialize};

use crate::schema::ResponseFile;

/// An output file produced by one template instantiation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedFile {
    pub name: String,
    pub content: String,
}

impl RenderedFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl From<RenderedFile> for ResponseFile {
    fn from(file: RenderedFile) -> Self {
        ResponseFile {
            name: file.name,
            content: file.content,
        }
    }
}

/// What a single render task reports back to the collector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The template rendered to nothing for this schema unit
    Skipped,
    Rendered(RenderedFile),
}

/// Everything a render pass collected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Non-empty outputs, in template launch order
    pub files: Vec<RenderedFile>,
    pub skipped: usize,
}

impl PassSummary {
    /// Number of outcomes the collector consumed
    pub fn outcomes(&self) -> usize {
        self.files.len() + self.skipped
    }
}

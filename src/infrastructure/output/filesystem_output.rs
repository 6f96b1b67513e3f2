//! Filesystem-based output service for standalone runs

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::{ApplicationError, OutputService};
use crate::generation::RenderedFile;

/// Output service that writes each file beneath a root directory
pub struct FileSystemOutputService {
    root: PathBuf,
}

impl FileSystemOutputService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Target path for an output name; names may not climb out of the root
    fn target(&self, name: &str) -> Result<PathBuf, ApplicationError> {
        let relative = Path::new(name);
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
        {
            return Err(ApplicationError::OutputError(format!(
                "Refusing to write {name} outside of {}",
                self.root.display()
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn emit(&self, files: &[RenderedFile]) -> Result<(), ApplicationError> {
        for file in files {
            let path = self.target(&file.name)?;

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    ApplicationError::OutputError(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }

            let mut handle = fs::File::create(&path).await.map_err(|e| {
                ApplicationError::OutputError(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            handle
                .write_all(file.content.as_bytes())
                .await
                .map_err(|e| {
                    ApplicationError::OutputError(format!(
                        "Failed to write file {}: {}",
                        path.display(),
                        e
                    ))
                })?;

            handle.flush().await.map_err(|e| {
                ApplicationError::OutputError(format!(
                    "Failed to flush file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            tracing::debug!(path = %path.display(), bytes = file.content.len(), "Wrote output file");
        }

        tracing::info!(count = files.len(), root = %self.root.display(), "Wrote generated files");
        Ok(())
    }
}

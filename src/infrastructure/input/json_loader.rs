//! JSON request loader
//!
//! The front-end pipes the request on stdin. For standalone runs the same
//! JSON can be read from a file.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncReadExt;

use crate::application::{ApplicationError, RequestLoader};
use crate::schema::GeneratorRequest;

/// Where the request JSON comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    Stdin,
    File(PathBuf),
}

/// Loads a [`GeneratorRequest`] encoded as JSON
pub struct JsonRequestLoader {
    source: RequestSource,
}

impl JsonRequestLoader {
    pub fn new(source: RequestSource) -> Self {
        Self { source }
    }

    pub fn stdin() -> Self {
        Self::new(RequestSource::Stdin)
    }

    async fn read_raw(&self) -> Result<String, ApplicationError> {
        match &self.source {
            RequestSource::Stdin => {
                let mut raw = String::new();
                tokio::io::stdin().read_to_string(&mut raw).await?;
                Ok(raw)
            }
            RequestSource::File(path) => Ok(fs::read_to_string(path).await?),
        }
    }
}

#[async_trait]
impl RequestLoader for JsonRequestLoader {
    async fn load(&self) -> Result<GeneratorRequest, ApplicationError> {
        let raw = self.read_raw().await?;
        let request: GeneratorRequest = serde_json::from_str(&raw)?;
        tracing::debug!(
            source = ?self.source,
            files = request.proto_file.len(),
            to_generate = request.file_to_generate.len(),
            "Loaded generator request"
        );
        Ok(request)
    }
}

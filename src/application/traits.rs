//! Port interfaces for the application layer

use async_trait::async_trait;

use crate::application::ApplicationError;
use crate::generation::RenderedFile;

/// Destination for the merged output of one invocation
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Emit every file, in order. Called at most once per invocation.
    async fn emit(&self, files: &[RenderedFile]) -> Result<(), ApplicationError>;
}

/// Source of the generator request
#[async_trait]
pub trait RequestLoader: Send + Sync {
    async fn load(&self) -> Result<crate::schema::GeneratorRequest, ApplicationError>;
}

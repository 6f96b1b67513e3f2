//! Response envelope written to stdout for the front-end

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::application::{ApplicationError, OutputService};
use crate::generation::RenderedFile;
use crate::schema::{GeneratorResponse, ResponseFile};

/// Encode the merged files as a JSON [`GeneratorResponse`]
pub fn encode_response(files: &[RenderedFile]) -> Result<Vec<u8>, ApplicationError> {
    let response = GeneratorResponse {
        error: None,
        file: files.iter().cloned().map(ResponseFile::from).collect(),
    };
    serde_json::to_vec(&response)
        .map_err(|e| ApplicationError::OutputError(format!("Failed to encode response: {e}")))
}

/// Output service writing the response envelope to an async writer (stdout by default)
pub struct ResponseOutputService<W> {
    writer: Mutex<W>,
}

impl ResponseOutputService<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> ResponseOutputService<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> OutputService for ResponseOutputService<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn emit(&self, files: &[RenderedFile]) -> Result<(), ApplicationError> {
        let encoded = encode_response(files)?;

        let mut writer = self.writer.lock().await;
        writer.write_all(&encoded).await?;
        writer.flush().await?;

        tracing::debug!(count = files.len(), bytes = encoded.len(), "Wrote response");
        Ok(())
    }
}

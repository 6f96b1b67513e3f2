//! Use case for answering one generator request

use std::sync::Arc;

use crate::application::{
    ApplicationError, ConfigOverrides, GenerateResponse, OutputService, validate_request,
};
use crate::core::config::GeneratorConfig;
use crate::generation::{BuildInfo, GenerationOrchestrator};
use crate::schema::GeneratorRequest;

/// Use case for running the plugin against a decoded request
pub struct GeneratePluginUseCase {
    build: BuildInfo,
    overrides: ConfigOverrides,
    output_service: Arc<dyn OutputService>,
}

impl GeneratePluginUseCase {
    pub fn new(
        build: BuildInfo,
        overrides: ConfigOverrides,
        output_service: Arc<dyn OutputService>,
    ) -> Self {
        Self {
            build,
            overrides,
            output_service,
        }
    }

    pub async fn execute(
        &self,
        request: GeneratorRequest,
    ) -> Result<GenerateResponse, ApplicationError> {
        // 1. Validate request
        validate_request(&request)?;

        // 2. Resolve configuration
        let config = self
            .overrides
            .apply(GeneratorConfig::from_parameter(request.parameter.as_deref()));
        let orchestrator = GenerationOrchestrator::new(config, self.build.clone());
        let config = orchestrator.config();
        if config.debug {
            tracing::info!(
                template_dir = %config.template_dir.display(),
                destination_dir = %config.destination_dir,
                mode = %config.mode,
                files = request.proto_file.len(),
                "Resolved generator configuration"
            );
        }
        let mode = config.mode;

        // 3. Generate
        let files = orchestrator.generate(request.proto_file).await?;

        // 4. Emit everything at once; nothing was written if generation failed
        self.output_service.emit(&files).await?;

        Ok(GenerateResponse {
            files_count: files.len(),
            mode,
        })
    }
}

//! Generation orchestration - runs one pass per schema unit and merges the results

use std::sync::Arc;

use crate::core::config::{GeneratorConfig, PassMode};
use crate::generation::helpers::ProtoHelpers;
use crate::generation::options::ExtensionOptionReader;
use crate::generation::{
    BuildInfo, ContextBuilder, FileScope, GenerationError, HelperLibrary, MergeTable,
    OptionReader, RenderedFile, TemplateEncoder, TemplateLocator, TemplateUnit,
};
use crate::schema::{FileSchema, ServiceSchema};

/// Orchestrates the code generation workflow
pub struct GenerationOrchestrator {
    config: GeneratorConfig,
    build: Arc<BuildInfo>,
    helpers: Arc<dyn HelperLibrary>,
    option_reader: Arc<dyn OptionReader>,
}

impl GenerationOrchestrator {
    /// Create an orchestrator with the default helper library and option reader
    pub fn new(config: GeneratorConfig, build: BuildInfo) -> Self {
        let option_reader = Arc::new(ExtensionOptionReader::new(config.option_extension.clone()));
        Self {
            config,
            build: Arc::new(build),
            helpers: Arc::new(ProtoHelpers::new()),
            option_reader,
        }
    }

    /// Replace the helper library exposed to templates
    pub fn with_helpers(mut self, helpers: Arc<dyn HelperLibrary>) -> Self {
        self.helpers = helpers;
        self
    }

    /// Replace the reader used to extract per-message custom options
    pub fn with_option_reader(mut self, option_reader: Arc<dyn OptionReader>) -> Self {
        self.option_reader = option_reader;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Execute the generation workflow over every file, in order.
    ///
    /// Passes run one after another; only the templates within a pass render
    /// concurrently. Colliding outputs are concatenated in pass order.
    pub async fn generate(
        &self,
        files: Vec<FileSchema>,
    ) -> Result<Vec<RenderedFile>, GenerationError> {
        tracing::debug!(
            files = files.len(),
            mode = %self.config.mode,
            template_dir = %self.config.template_dir.display(),
            "Orchestrator starting generation"
        );

        // 1. Discover templates; nothing renders if this fails
        let templates = self.discover().await?;

        // 2. One or more passes per file, merged as they complete
        let mut table = MergeTable::new();
        for file in files {
            let scope = FileScope::prepare(file, self.option_reader.as_ref(), self.helpers.as_ref());

            match self.config.mode {
                PassMode::WholeFile => {
                    let encoder = self.encoder(scope, None);
                    table.extend(encoder.files(&templates).await?);
                }
                PassMode::PerService => {
                    for service in scope.file().service.clone() {
                        let encoder = self.encoder(scope.clone(), Some(service));
                        table.extend(encoder.files(&templates).await?);
                    }
                }
            }
        }

        tracing::debug!(outputs = table.len(), "Orchestrator finished generation");
        Ok(table.into_files())
    }

    async fn discover(&self) -> Result<Vec<TemplateUnit>, GenerationError> {
        let locator = TemplateLocator::new(self.config.template_dir.clone(), self.config.debug);
        tokio::task::spawn_blocking(move || locator.discover())
            .await
            .map_err(|e| GenerationError::TaskFailed {
                task: "template discovery".to_string(),
                message: e.to_string(),
            })?
    }

    fn encoder(&self, scope: FileScope, service: Option<ServiceSchema>) -> TemplateEncoder {
        let builder = ContextBuilder::new(Arc::clone(&self.build), scope, service, &self.config);
        TemplateEncoder::new(builder, Arc::clone(&self.helpers))
    }
}

//! Template encoder - renders every template for one schema unit in parallel
//!
//! Each template becomes one blocking task that builds its own context,
//! resolves its filename, then renders its content. The collector gathers one
//! outcome per task in whatever order they finish. The first error aborts the
//! pass: tasks not yet started are cancelled, tasks already running are
//! detached and their results discarded.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::generation::filename::resolve_filename;
use crate::generation::locator::TEMPLATE_SUFFIX;
use crate::generation::renderer::render_content;
use crate::generation::{
    ContextBuilder, GenerationError, HelperLibrary, PassSummary, RenderOutcome, RenderedFile,
    TemplateUnit,
};

/// Renders templates against one schema unit (a whole file, or one service in it)
#[derive(Clone)]
pub struct TemplateEncoder {
    builder: Arc<ContextBuilder>,
    helpers: Arc<dyn HelperLibrary>,
}

impl TemplateEncoder {
    pub fn new(builder: ContextBuilder, helpers: Arc<dyn HelperLibrary>) -> Self {
        let file = &builder.file().name;
        let template_dir = builder.template_dir().display();
        match (builder.service(), builder.debug()) {
            (Some(service), true) => tracing::info!(
                file = %file,
                service = %service.name,
                template_dir = %template_dir,
                "new encoder"
            ),
            (None, true) => {
                tracing::info!(file = %file, template_dir = %template_dir, "new encoder")
            }
            _ => tracing::debug!(file = %file, "new encoder"),
        }

        Self {
            builder: Arc::new(builder),
            helpers,
        }
    }

    /// Render a single template: context, then filename, then content
    pub fn render_unit(&self, unit: &TemplateUnit) -> Result<RenderOutcome, GenerationError> {
        let mut context = self.builder.build(unit);
        resolve_filename(&mut context, self.helpers.as_ref())?;

        let (content, output_path) = render_content(
            self.builder.template_dir(),
            unit,
            &context,
            self.helpers.as_ref(),
        )?;

        if content.is_empty() {
            return Ok(RenderOutcome::Skipped);
        }

        let name = match output_path.strip_suffix(TEMPLATE_SUFFIX) {
            Some(stripped) => stripped.to_string(),
            None => {
                tracing::warn!(
                    template = %unit,
                    output = %output_path,
                    "Resolved filename lost its template suffix"
                );
                output_path
            }
        };

        Ok(RenderOutcome::Rendered(RenderedFile { name, content }))
    }

    /// Render all templates concurrently and collect their outcomes.
    ///
    /// Outputs are returned in template order regardless of completion order.
    pub async fn render_pass(
        &self,
        templates: &[TemplateUnit],
    ) -> Result<PassSummary, GenerationError> {
        let mut tasks = JoinSet::new();
        let mut launched = HashMap::with_capacity(templates.len());

        for (index, unit) in templates.iter().enumerate() {
            let encoder = self.clone();
            let task_unit = unit.clone();
            let handle = tasks.spawn_blocking(move || {
                let outcome = encoder.render_unit(&task_unit);
                (index, task_unit, outcome)
            });
            launched.insert(handle.id(), unit.clone());
        }

        let mut rendered = Vec::with_capacity(templates.len());
        let mut summary = PassSummary::default();

        while let Some(joined) = tasks.join_next().await {
            let (index, unit, outcome) = match joined {
                Ok(result) => result,
                Err(e) => {
                    let task = launched
                        .get(&e.id())
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "<unknown>".to_string());
                    tasks.abort_all();
                    tracing::debug!(template = %task, error = %e, "Render task failed");
                    return Err(GenerationError::TaskFailed {
                        task,
                        message: e.to_string(),
                    });
                }
            };

            match outcome {
                Ok(RenderOutcome::Rendered(file)) => rendered.push((index, file)),
                Ok(RenderOutcome::Skipped) => {
                    tracing::debug!(template = %unit, "Template rendered empty, skipping");
                    summary.skipped += 1;
                }
                Err(e) => {
                    tasks.abort_all();
                    tracing::debug!(template = %unit, error = %e, "Failed to render template");
                    return Err(e);
                }
            }
        }

        rendered.sort_by_key(|(index, _)| *index);
        summary.files = rendered.into_iter().map(|(_, file)| file).collect();

        if self.builder.debug() {
            tracing::info!(
                file = %self.builder.file().name,
                rendered = summary.files.len(),
                skipped = summary.skipped,
                "Pass complete"
            );
        }
        Ok(summary)
    }

    /// Render all templates and return the non-empty outputs
    pub async fn files(
        &self,
        templates: &[TemplateUnit],
    ) -> Result<Vec<RenderedFile>, GenerationError> {
        Ok(self.render_pass(templates).await?.files)
    }
}

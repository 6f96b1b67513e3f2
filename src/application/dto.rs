//! Data transfer objects for the application layer

use std::path::PathBuf;

use crate::application::ValidationError;
use crate::core::config::{GeneratorConfig, PassMode};
use crate::schema::GeneratorRequest;

/// Command-line values that take precedence over the request parameter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub template_dir: Option<PathBuf>,
    pub destination_dir: Option<String>,
    /// Only ever turns debug on
    pub debug: bool,
    /// Only ever switches to whole-file mode
    pub all: bool,
}

impl ConfigOverrides {
    /// Layer the overrides on top of a parsed configuration
    pub fn apply(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(template_dir) = &self.template_dir {
            config.template_dir = template_dir.clone();
        }
        if let Some(destination_dir) = &self.destination_dir {
            config.destination_dir = destination_dir.clone();
        }
        if self.debug {
            config.debug = true;
        }
        if self.all {
            config.mode = PassMode::WholeFile;
        }
        config
    }
}

/// Reject requests that name nothing to generate
pub fn validate_request(request: &GeneratorRequest) -> Result<(), ValidationError> {
    if request.file_to_generate.is_empty() {
        return Err(ValidationError::NoFilesToGenerate);
    }
    Ok(())
}

/// What a successful invocation produced
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    pub files_count: usize,
    pub mode: PassMode,
}

//! Generator configuration
//!
//! The front-end forwards everything after the `=` in `--tera_out=...:` (or the
//! `--tera_opt` flag) as a single comma-separated parameter string. This module
//! turns that string into a [`GeneratorConfig`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

/// Default location of the template tree
pub const DEFAULT_TEMPLATE_DIR: &str = "./templates";

/// Default destination directory exposed to templates
pub const DEFAULT_DESTINATION_DIR: &str = ".";

/// Schema extension read for per-message custom options
pub const DEFAULT_OPTION_EXTENSION: &str = "tera.template_option";

/// Granularity of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassMode {
    /// One pass per service in every file; files without services produce nothing
    #[default]
    PerService,
    /// One pass per file
    WholeFile,
}

impl fmt::Display for PassMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassMode::PerService => write!(f, "per-service"),
            PassMode::WholeFile => write!(f, "whole-file"),
        }
    }
}

/// Configuration consumed by the generation pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub template_dir: PathBuf,
    /// Passed through to templates untouched
    pub destination_dir: String,
    pub debug: bool,
    pub mode: PassMode,
    pub option_extension: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            destination_dir: DEFAULT_DESTINATION_DIR.to_string(),
            debug: false,
            mode: PassMode::default(),
            option_extension: DEFAULT_OPTION_EXTENSION.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Build a configuration from the raw parameter string.
    ///
    /// Malformed pairs, unknown keys and invalid boolean values are logged and
    /// skipped; they never fail the invocation.
    pub fn from_parameter(parameter: Option<&str>) -> Self {
        let mut config = Self::default();
        let Some(parameter) = parameter.filter(|p| !p.is_empty()) else {
            return config;
        };

        for param in parameter.split(',') {
            let parts: Vec<&str> = param.split('=').collect();
            let [key, value] = parts.as_slice() else {
                warn!(param = %param, "invalid parameter");
                continue;
            };

            match *key {
                "template_dir" => config.template_dir = PathBuf::from(value),
                "destination_dir" => config.destination_dir = value.to_string(),
                "option_extension" => config.option_extension = value.to_string(),
                "debug" => {
                    if let Some(flag) = parse_flag(key, value) {
                        config.debug = flag;
                    }
                }
                "all" => {
                    if let Some(flag) = parse_flag(key, value) {
                        config.mode = if flag {
                            PassMode::WholeFile
                        } else {
                            PassMode::PerService
                        };
                    }
                }
                _ => warn!(param = %param, "unknown parameter"),
            }
        }

        config
    }
}

impl FromStr for GeneratorConfig {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_parameter(Some(s)))
    }
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "t" => Some(true),
        "false" | "f" => Some(false),
        _ => {
            warn!(key = %key, value = %value, "invalid boolean value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_defaults_without_parameter() {
        let config = GeneratorConfig::from_parameter(None);

        assert_eq!(config.template_dir, PathBuf::from("./templates"));
        assert_eq!(config.destination_dir, ".");
        assert!(!config.debug);
        assert_eq!(config.mode, PassMode::PerService);
        assert_eq!(config.option_extension, DEFAULT_OPTION_EXTENSION);
    }

    #[test]
    fn test_full_parameter_string() {
        let config: GeneratorConfig =
            "template_dir=/tmp/tmpl,destination_dir=gen/go,debug=T,all=true,option_extension=acme.opt"
                .parse()
                .unwrap();

        assert_eq!(config.template_dir, PathBuf::from("/tmp/tmpl"));
        assert_eq!(config.destination_dir, "gen/go");
        assert!(config.debug);
        assert_eq!(config.mode, PassMode::WholeFile);
        assert_eq!(config.option_extension, "acme.opt");
    }

    #[test]
    #[traced_test]
    fn test_bad_entries_are_skipped() {
        let config =
            GeneratorConfig::from_parameter(Some("debug=maybe,nonsense,colour=red,a=b=c,all=f"));

        assert!(!config.debug);
        assert_eq!(config.mode, PassMode::PerService);
        assert_eq!(config.template_dir, PathBuf::from(DEFAULT_TEMPLATE_DIR));
        assert!(logs_contain("invalid boolean value"));
        assert!(logs_contain("invalid parameter"));
        assert!(logs_contain("unknown parameter"));
    }
}

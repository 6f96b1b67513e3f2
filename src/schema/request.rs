//! Request and response envelopes exchanged with the compiler front-end

use serde::{Deserialize, Serialize};

use crate::schema::FileSchema;

/// What the front-end hands to the plugin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorRequest {
    /// Files named on the front-end's command line
    #[serde(default)]
    pub file_to_generate: Vec<String>,
    /// Raw plugin parameter string, e.g. `template_dir=./tmpl,debug=true`
    #[serde(default)]
    pub parameter: Option<String>,
    /// Every file in the compilation, dependencies first
    #[serde(default)]
    pub proto_file: Vec<FileSchema>,
}

/// What the plugin hands back
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub file: Vec<ResponseFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFile {
    pub name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_minimal() {
        let request: GeneratorRequest =
            serde_json::from_str(r#"{"file_to_generate": ["a.proto"]}"#).unwrap();

        assert_eq!(request.file_to_generate, vec!["a.proto".to_string()]);
        assert!(request.parameter.is_none());
        assert!(request.proto_file.is_empty());
    }

    #[test]
    fn test_response_serializes_null_error() {
        let response = GeneratorResponse {
            error: None,
            file: vec![ResponseFile {
                name: "out.go".to_string(),
                content: "package out".to_string(),
            }],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["error"].is_null());
        assert_eq!(json["file"][0]["name"], "out.go");
    }
}

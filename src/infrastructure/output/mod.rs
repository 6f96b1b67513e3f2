//! Output service implementations

pub mod filesystem_output;
pub mod stdout_output;

pub use filesystem_output::*;
pub use stdout_output::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, OutputService};
    use crate::generation::RenderedFile;
    use crate::schema::GeneratorResponse;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_filesystem_output_writes_nested_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new(temp_dir.path());

        let files = vec![
            RenderedFile::new("./users.proto_readme.md", "# Users"),
            RenderedFile::new("gen/go/users.proto_users.pb.go", "package users"),
        ];

        output_service.emit(&files).await.unwrap();

        let readme = std::fs::read_to_string(temp_dir.path().join("users.proto_readme.md"))
            .expect("Failed to read readme");
        assert_eq!(readme, "# Users");
        let go = std::fs::read_to_string(temp_dir.path().join("gen/go/users.proto_users.pb.go"))
            .expect("Failed to read go file");
        assert_eq!(go, "package users");
    }

    #[tokio::test]
    async fn test_filesystem_output_rejects_escaping_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new(temp_dir.path().join("out"));

        let err = output_service
            .emit(&[RenderedFile::new("../escape.txt", "nope")])
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::OutputError(_)));
        assert!(!temp_dir.path().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn test_response_output_encodes_envelope() {
        let output_service = ResponseOutputService::new(Vec::<u8>::new());

        output_service
            .emit(&[
                RenderedFile::new("./a.proto_x.go", "x"),
                RenderedFile::new("./a.proto_y.go", "y"),
            ])
            .await
            .unwrap();

        let written = output_service.into_inner();
        let response: GeneratorResponse = serde_json::from_slice(&written).unwrap();
        assert!(response.error.is_none());
        assert_eq!(response.file.len(), 2);
        assert_eq!(response.file[1].name, "./a.proto_y.go");
        assert_eq!(response.file[1].content, "y");
    }

    #[test]
    fn test_encode_empty_response() {
        let encoded = encode_response(&[]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&encoded).unwrap();
        assert!(value["error"].is_null());
        assert_eq!(value["file"], serde_json::json!([]));
    }
}

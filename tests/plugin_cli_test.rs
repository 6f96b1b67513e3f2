//! Integration tests driving the plugin binary end to end

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn write_template(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn request(template_dir: &Path, extra_parameter: &str) -> String {
    let parameter = if extra_parameter.is_empty() {
        format!("template_dir={}", template_dir.display())
    } else {
        format!("template_dir={},{extra_parameter}", template_dir.display())
    };

    json!({
        "file_to_generate": ["acme/users.proto"],
        "parameter": parameter,
        "proto_file": [{
            "name": "acme/users.proto",
            "package": "acme",
            "syntax": "proto3",
            "message_type": [
                {
                    "name": "User",
                    "field": [{"name": "id", "number": 1, "type": "TYPE_STRING"}],
                    "options": {"extensions": {"tera.template_option": {"table": "users"}}}
                },
                {"name": "GetUserRequest"}
            ],
            "enum_type": [{"name": "Role", "value": [{"name": "ADMIN", "number": 0}]}],
            "service": [
                {
                    "name": "UserService",
                    "method": [{
                        "name": "GetUser",
                        "input_type": ".acme.GetUserRequest",
                        "output_type": ".acme.User"
                    }]
                },
                {"name": "AdminService"}
            ]
        }]
    })
    .to_string()
}

fn response(stdout: &[u8]) -> Value {
    serde_json::from_slice(stdout).expect("stdout should carry a JSON response")
}

#[test]
fn test_per_service_response_on_stdout() {
    let templates = TempDir::new().unwrap();
    write_template(
        templates.path(),
        "{{ service.name | snake_case }}.go.tmpl",
        "package {{ file.package }}\n// {{ service.name }} has {{ service.method | length }} methods\n",
    );

    let output = Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .write_stdin(request(templates.path(), ""))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let response = response(&output);
    assert!(response["error"].is_null());
    let files = response["file"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["name"], "./users.proto_user_service.go");
    assert_eq!(
        files[0]["content"],
        "package acme\n// UserService has 1 methods\n"
    );
    assert_eq!(files[1]["name"], "./users.proto_admin_service.go");
}

#[test]
fn test_colliding_outputs_are_concatenated() {
    let templates = TempDir::new().unwrap();
    write_template(
        templates.path(),
        "services.txt.tmpl",
        "{{ service.name }}\n",
    );

    let output = Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .write_stdin(request(templates.path(), ""))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let response = response(&output);
    assert_eq!(
        response["file"],
        json!([{
            "name": "./users.proto_services.txt",
            "content": "UserService\nAdminService\n"
        }])
    );
}

#[test]
fn test_whole_file_mode_with_helpers_and_options() {
    let templates = TempDir::new().unwrap();
    write_template(
        templates.path(),
        "schema.sql.tmpl",
        "{% for name, opt in options %}CREATE TABLE {{ opt.table }}; -- {{ name }}{% endfor %}\
         {% set t = lookup_type(name='.acme.User') %} -- {{ t.kind }} {{ '.acme.User' | trim_package }}",
    );
    write_template(templates.path(), "skipped.txt.tmpl", "{% if service %}x{% endif %}");

    let output = Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .arg("--all")
        .write_stdin(request(templates.path(), ""))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let response = response(&output);
    let files = response["file"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "./users.proto_schema.sql");
    assert_eq!(
        files[0]["content"],
        "CREATE TABLE users; -- User -- message User"
    );
}

#[test]
fn test_output_dir_writes_files() {
    let templates = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_template(
        templates.path(),
        "docs/{{ service.name | kebab_case }}.md.tmpl",
        "# {{ service.name }}",
    );

    Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .arg("--output-dir")
        .arg(out.path())
        .write_stdin(request(templates.path(), ""))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(out.path().join("docs/users.proto_user-service.md")).unwrap();
    assert_eq!(written, "# UserService");
    assert!(out.path().join("docs/users.proto_admin-service.md").exists());
}

#[test]
fn test_input_file_and_template_dir_override() {
    let templates = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    write_template(templates.path(), "a.txt.tmpl", "{{ file.name }}");
    let request_path = work.path().join("request.json");
    fs::write(&request_path, request(Path::new("/does/not/exist"), "all=true")).unwrap();

    let output = Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .arg("--input")
        .arg(&request_path)
        .arg("--template-dir")
        .arg(templates.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(response(&output)["file"][0]["content"], "acme/users.proto");
}

#[test]
fn test_malformed_template_fails_without_response() {
    let templates = TempDir::new().unwrap();
    write_template(templates.path(), "good.txt.tmpl", "fine");
    write_template(templates.path(), "broken.txt.tmpl", "{% if %}");

    Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .write_stdin(request(templates.path(), ""))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("broken.txt.tmpl"));
}

#[test]
fn test_render_error_exits_without_waiting_for_running_templates() {
    let templates = TempDir::new().unwrap();
    write_template(templates.path(), "a_broken.txt.tmpl", "{% if %}");
    write_template(
        templates.path(),
        "b_slow.txt.tmpl",
        "{% for i in range(end=3000) %}{% for j in range(end=3000) %}\
         {% for k in range(end=3000) %}{% endfor %}{% endfor %}{% endfor %}",
    );

    let started = Instant::now();
    let output = Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .timeout(Duration::from_secs(15))
        .write_stdin(request(templates.path(), "all=true"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .get_output()
        .clone();

    assert!(started.elapsed() < Duration::from_secs(15));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a_broken.txt.tmpl"));
    assert_eq!(stderr.matches("Generation failed").count(), 1);
    assert_eq!(stderr.matches("ERROR").count(), 1);
}

#[test]
fn test_missing_template_dir_fails() {
    Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .write_stdin(request(Path::new("/does/not/exist"), ""))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("/does/not/exist"));
}

#[test]
fn test_empty_file_to_generate_is_rejected() {
    Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .write_stdin(r#"{"file_to_generate": [], "proto_file": []}"#)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no files to generate"));
}

#[test]
fn test_malformed_request_is_rejected() {
    Command::cargo_bin("protoc-gen-tera")
        .unwrap()
        .write_stdin("not json")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read generator request"));
}

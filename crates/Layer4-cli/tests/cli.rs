//! quill 바이너리 통합 테스트
//!
//! 각 테스트는 임시 디렉토리에서 실행하며 HOME도 임시 디렉토리로 바꿔
//! 사용자 플러그인(~/.quill/plugins)의 영향을 받지 않습니다.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn quill(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_quill"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run quill");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for quill")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const NOOP_CONFIG: &str = r#"
[project]
name = "demo"
project_type = "noop"
project_root = "."

[bot]
name = "simple"

[llm]
model_name = "echo"

[server]
name = "null"
"#;

#[test]
fn serve_without_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = quill(dir.path(), &["serve"], "");

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("ConfigError"), "stderr: {}", err);
    assert!(err.contains("quill.toml"), "stderr: {}", err);
}

#[test]
fn init_with_defaults_then_refuses_second_init() {
    let dir = tempfile::tempdir().unwrap();

    let output = quill(dir.path(), &["init"], "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let config = std::fs::read_to_string(dir.path().join("quill.toml")).unwrap();
    assert!(config.contains("project_type = \"static-website\""));
    assert!(config.contains("model_name = \"gpt-3.5-turbo\""));

    let output = quill(dir.path(), &["init"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("already exists"));
}

#[test]
fn init_rejects_invalid_choice() {
    let dir = tempfile::tempdir().unwrap();
    let output = quill(dir.path(), &["init"], "demo\nbogus\n");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("ValidationError"));
    assert!(!dir.path().join("quill.toml").exists());
}

#[test]
fn new_creates_project_and_rejects_existing() {
    let dir = tempfile::tempdir().unwrap();

    let output = quill(dir.path(), &["new", "site"], "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("site/quill.toml").is_file());

    let output = quill(dir.path(), &["new", "site"], "");
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("ProjectAlreadyExists"), "stderr: {}", err);
    assert!(err.contains("Project site already exists."), "stderr: {}", err);
}

#[test]
fn build_new_static_site() {
    let dir = tempfile::tempdir().unwrap();
    let output = quill(dir.path(), &["new", "site"], "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let site = dir.path().join("site");
    let output = quill(&site, &["build"], "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(site.join("dist/index.html").is_file());
}

#[test]
fn serve_noop_project_completes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("quill.toml"), NOOP_CONFIG).unwrap();

    let output = quill(dir.path(), &["serve"], "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Running demo..."));
}

#[test]
fn serve_loads_plugin_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("quill.toml"),
        NOOP_CONFIG.replace("name = \"null\"", "name = \"quiet\""),
    )
    .unwrap();
    std::fs::create_dir(dir.path().join("plugins")).unwrap();
    std::fs::write(
        dir.path().join("plugins/house.toml"),
        "name = \"house\"\n\n[[server]]\nname = \"quiet\"\nkind = \"null\"\n",
    )
    .unwrap();

    // 플러그인 없이는 'quiet'를 모름
    let output = quill(dir.path(), &["serve"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("UnknownTypeError"));

    let output = quill(dir.path(), &["serve", "plugins/house.toml"], "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn serve_missing_plugin_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("quill.toml"), NOOP_CONFIG).unwrap();

    let output = quill(dir.path(), &["serve", "missing.toml"], "");
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("ConfigError"), "stderr: {}", err);
    assert!(err.contains("missing.toml"), "stderr: {}", err);
}

#[test]
fn types_lists_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = quill(dir.path(), &["types"], "");

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("gpt-3.5-turbo (default)"));
    assert!(out.contains("  echo"));
    assert!(out.contains("static-website-server (default)"));
}

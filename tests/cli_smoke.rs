mod common;

use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

use common::{clean_body, serve_once, two_errors_body};

fn run_cli(args: &[&str]) -> Output {
    let bin_path = std::env::var("CARGO_BIN_EXE_csl-validate")
        .unwrap_or_else(|_| "target/debug/csl-validate".to_string());

    Command::new(bin_path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to run csl-validate")
}

fn empty_config(dir: &TempDir) -> String {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").expect("write config");
    path.to_string_lossy().into_owned()
}

#[test]
fn cli_reports_errors_as_json() {
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);
    let (endpoint, server) = serve_once(200, two_errors_body());

    let output = run_cli(&[
        "--config",
        &config,
        "--endpoint",
        &endpoint,
        "--method",
        "textarea",
        "--json",
        "--select",
        "2",
        "<style/>",
    ]);
    let captured = server.join().unwrap();

    assert!(captured.request_line.starts_with("POST "));
    assert!(captured.body_text().contains("<style/>"));

    assert_eq!(output.status.code(), Some(1));
    let view: Value = serde_json::from_slice(&output.stdout).expect("stdout is a JSON view");
    assert_eq!(view["state"]["state"], "errors");
    assert_eq!(view["state"]["detail"], 2);
    assert_eq!(view["inserted"]["banners"][0]["message"], "Oops, I found 2 errors.");
    assert_eq!(view["inserted"]["current_error"]["index"], 2);
}

#[test]
fn cli_saves_clean_style() {
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);
    let save_dir = dir.path().join("out");
    std::fs::create_dir(&save_dir).unwrap();
    let (endpoint, server) = serve_once(200, clean_body());

    let output = run_cli(&[
        "--config",
        &config,
        "--endpoint",
        &endpoint,
        "--save",
        save_dir.to_str().unwrap(),
        "https://example.org/apa.csl",
    ]);
    let captured = server.join().unwrap();

    assert!(captured.request_line.starts_with("GET /validate/?"));
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Good job! No errors found."));

    let saved = std::fs::read_to_string(save_dir.join("apa.csl")).expect("saved style");
    assert!(saved.starts_with("<?xml"));
    assert!(saved.contains("<id>http://www.zotero.org/styles/apa</id>"));
}

#[test]
fn cli_without_document_fails() {
    let dir = TempDir::new().unwrap();
    let config = empty_config(&dir);

    let output = run_cli(&["--config", &config]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Nothing to validate"));
}

/*
[INPUT]:  Built mexc-history binary and YAML configuration files
[OUTPUT]: Process-level checks of dry-run and configuration failures
[POS]:    Integration test layer - binary invocation
[UPDATE]: When changing CLI flags or exit behaviour
*/

use std::io::Write;
use std::process::{Command, Output};

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mexc-history"))
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("MEXC_API_KEY")
        .env_remove("MEXC_API_SECRET")
        .output()
        .expect("Failed to start mexc-history binary")
}

fn describe(output: &Output) -> String {
    format!(
        "status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn cli_mode_with_config_and_dry_run_works() {
    let config_path = format!("{}/examples/history.yaml", env!("CARGO_MANIFEST_DIR"));

    let output = run_binary(&["--config", &config_path, "--dry-run", "positions"]);

    assert!(output.status.success(), "{}", describe(&output));
    // Dry run never reaches the report stage
    assert!(output.stdout.is_empty(), "{}", describe(&output));
}

#[test]
fn dry_run_without_config_uses_defaults() {
    let output = run_binary(&["--dry-run", "all"]);
    assert!(output.status.success(), "{}", describe(&output));
}

#[test]
fn invalid_config_exits_non_zero() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "page_size: 500").expect("write config");
    let config_path = file.path().to_string_lossy().into_owned();

    let output = run_binary(&["--config", &config_path, "--dry-run", "orders"]);

    assert_eq!(output.status.code(), Some(1), "{}", describe(&output));
}

#[test]
fn missing_config_file_exits_non_zero() {
    let output = run_binary(&["--config", "/nonexistent/history.yaml", "--dry-run", "all"]);
    assert_eq!(output.status.code(), Some(1), "{}", describe(&output));
}

#[test]
fn flag_override_is_validated() {
    let output = run_binary(&["--days", "120", "--dry-run", "positions"]);
    assert_eq!(output.status.code(), Some(1), "{}", describe(&output));
}

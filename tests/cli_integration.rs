// CLI integration tests: short-circuits, doctor, and kernel dispatch.
use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

fn cmd(dir: &Path) -> Command {
    let exe = env!("CARGO_BIN_EXE_taro");
    let mut command = Command::new(exe);
    command
        .current_dir(dir)
        .env_remove("TARO_KERNEL")
        .env_remove("NODE_ENV")
        .env_remove("TARO_ENV")
        .env_remove("RUST_LOG");
    command
}

fn parse_json(output: &[u8]) -> Value {
    let text = std::str::from_utf8(output).expect("utf8");
    serde_json::from_str(text.trim()).expect("valid json")
}

#[test]
fn help_prints_seventeen_lines() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd(temp.path()).arg("-h").output().expect("help");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(text.lines().count(), 17);
    assert!(output.stderr.is_empty());
}

#[test]
fn no_arguments_prints_usage() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd(temp.path()).output().expect("usage");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.starts_with("Usage: taro"));
}

#[test]
fn version_prints_only_the_version() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd(temp.path()).arg("-v").output().expect("version");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).expect("utf8"),
        format!("{}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn build_without_kernel_is_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd(temp.path())
        .args(["build", "--type", "weapp"])
        .output()
        .expect("build");
    assert_eq!(output.status.code().unwrap(), 3);
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "NotFound");
    assert!(err["error"]["hint"].as_str().unwrap().contains("TARO_KERNEL"));
}

#[test]
fn unknown_builtin_flag_is_usage_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd(temp.path())
        .args(["build", "--not-a-flag"])
        .output()
        .expect("build");
    assert_eq!(output.status.code().unwrap(), 2);
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "Usage");
}

#[test]
fn doctor_reports_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("package.json"),
        r#"{"name":"demo","devDependencies":{"jest":"^29"}}"#,
    )
    .expect("write");
    fs::write(temp.path().join("README.md"), "# demo\n").expect("write");

    let output = cmd(temp.path())
        .args(["doctor", "--json"])
        .output()
        .expect("doctor");
    assert!(output.status.success());
    let report = parse_json(&output.stdout);
    assert_eq!(report["errors"], 0);
    let recommend = report["sections"][1]["lines"].as_array().expect("lines");
    assert_eq!(recommend.len(), 3);
    assert!(recommend.iter().all(|line| line["valid"] == true));
}

#[test]
fn doctor_outside_project_is_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd(temp.path()).arg("doctor").output().expect("doctor");
    assert_eq!(output.status.code().unwrap(), 3);
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "NotFound");
    assert!(err["error"]["path"].as_str().unwrap().ends_with("package.json"));
}

#[cfg(unix)]
#[test]
fn external_kernel_receives_envelope_on_stdin() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd(temp.path())
        .env("TARO_KERNEL", "cat")
        .args(["build", "--type", "weapp", "--watch", "--port", "8080"])
        .output()
        .expect("build");
    assert!(output.status.success());
    let envelope = parse_json(&output.stdout);
    assert_eq!(envelope["name"], "build");
    assert_eq!(envelope["opts"]["_"], serde_json::json!(["build"]));
    assert_eq!(envelope["opts"]["options"]["platform"], "weapp");
    assert_eq!(envelope["opts"]["options"]["isWatch"], true);
    assert_eq!(envelope["opts"]["options"]["port"], 8080);
    assert!(envelope["opts"]["options"]["env"].is_null());
    assert_eq!(envelope["opts"]["isHelp"], false);
    assert_eq!(envelope["mode"]["nodeEnv"], "production");
    assert_eq!(envelope["mode"]["taroEnv"], "weapp");
}

#[cfg(unix)]
#[test]
fn caller_node_env_is_kept() {
    let temp = tempfile::tempdir().expect("tempdir");
    for _ in 0..2 {
        let output = cmd(temp.path())
            .env("TARO_KERNEL", "cat")
            .env("NODE_ENV", "development")
            .args(["build", "--type", "weapp"])
            .output()
            .expect("build");
        assert!(output.status.success());
        let envelope = parse_json(&output.stdout);
        assert_eq!(envelope["mode"]["nodeEnv"], "development");
    }
}

#[cfg(unix)]
#[test]
fn custom_command_is_forwarded_untyped() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd(temp.path())
        .env("TARO_KERNEL", "cat")
        .args(["inspect", "entry", "--type", "weapp", "-h", "--version"])
        .output()
        .expect("inspect");
    assert!(output.status.success());
    let envelope = parse_json(&output.stdout);
    assert_eq!(envelope["name"], "inspect");
    assert_eq!(envelope["opts"]["_"], serde_json::json!(["inspect", "entry"]));
    assert_eq!(envelope["opts"]["options"], serde_json::json!({ "type": "weapp" }));
    assert_eq!(envelope["opts"]["isHelp"], true);
}

#[cfg(unix)]
#[test]
fn kernel_exit_code_is_propagated() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd(temp.path())
        .env("TARO_KERNEL", "false")
        .arg("convert")
        .output()
        .expect("convert");
    assert_eq!(output.status.code().unwrap(), 1);
}

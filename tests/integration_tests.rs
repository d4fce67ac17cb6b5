//! Integration tests for the parspeed CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn parspeed() -> Command {
    Command::cargo_bin("parspeed").unwrap()
}

fn json_report(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON report")
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    parspeed()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("parallel workload benchmarks"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    parspeed()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("parspeed"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    parspeed()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_matrix_text_report() {
    parspeed()
        .args(["matrix", "--size", "12", "--trials", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequential execution took:"))
        .stdout(predicate::str::contains("Parallel execution took:"))
        .stdout(predicate::str::contains("Speedup:"));
}

#[test]
fn test_pi_json_report() {
    let report = json_report(parspeed().args([
        "--format", "json", "pi", "--terms", "1000", "--workers", "4", "--trials", "2",
        "--reduction", "slots",
    ]));

    let pi = &report[0];
    assert_eq!(pi["workload"], "Pi (Nilakantha)");
    assert_eq!(pi["trials"], 2);
    assert!(pi["sequential_secs"].as_f64().unwrap() >= 0.0);

    let details = pi["details"].as_array().unwrap();
    let value = |label: &str| -> f64 {
        details
            .iter()
            .find(|d| d["label"] == label)
            .and_then(|d| d["value"].as_str())
            .and_then(|v| v.parse().ok())
            .unwrap()
    };
    assert!((value("Sequential π") - value("Parallel π")).abs() < 1e-9);
}

#[test]
fn test_factorial_with_custom_inputs() {
    let report = json_report(parspeed().args([
        "--format", "json", "factorial", "--inputs", "10,200,30", "--trials", "1",
    ]));
    assert_eq!(report[0]["workload"], "Factorial");
    assert_eq!(report[0]["details"][0]["value"], "3");
}

#[test]
fn test_all_runs_self_contained_workloads() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("parspeed.toml");
    fs::write(
        &config,
        r#"
[factorial]
inputs = [50, 100]
trials = 1

[matrix]
size = 8

[pi]
terms = 500
trials = 1
"#,
    )
    .unwrap();

    let report = json_report(
        parspeed()
            .current_dir(temp_dir.path())
            .args(["--format", "json", "all"]),
    );
    let workloads: Vec<_> = report
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["workload"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        workloads,
        vec!["Factorial", "Matrix multiplication", "Pi (Nilakantha)"]
    );
}

#[test]
fn test_records_sorted_stably_and_written() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data.json");
    fs::write(
        &input,
        r#"[
  {"name": "Carol", "email": "carol@example.com", "address": "3 Lane", "phone": "3", "website": "c.dev"},
  {"name": "Alice", "email": "alice-1@example.com", "address": "1 Road", "phone": "1", "website": "a.dev"},
  {"name": "Bob", "email": "bob@example.com", "address": "2 Street", "phone": "2", "website": "b.dev"},
  {"name": "Alice", "email": "alice-2@example.com", "address": "1 Road", "phone": "1", "website": "a.dev"}
]"#,
    )
    .unwrap();

    parspeed()
        .current_dir(temp_dir.path())
        .args(["records", "--input", "data.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record sorting"));

    for file in ["sequential_result.json", "parallel_result.json"] {
        let sorted: Value =
            serde_json::from_str(&fs::read_to_string(temp_dir.path().join(file)).unwrap()).unwrap();
        let emails: Vec<_> = sorted
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["email"].as_str().unwrap())
            .collect();
        assert_eq!(
            emails,
            vec![
                "alice-1@example.com",
                "alice-2@example.com",
                "bob@example.com",
                "carol@example.com"
            ],
            "{file}"
        );
    }
}

#[test]
fn test_records_pool_dispatch_writes_same_order() {
    let temp_dir = TempDir::new().unwrap();
    let records: Vec<Value> = (0..50)
        .map(|i| {
            serde_json::json!({
                "name": format!("n{}", i % 5),
                "email": format!("{i}@example.com"),
            })
        })
        .collect();
    fs::write(
        temp_dir.path().join("data.json"),
        serde_json::to_string(&records).unwrap(),
    )
    .unwrap();

    parspeed()
        .current_dir(temp_dir.path())
        .args(["-j", "2", "records", "--dispatch", "pool"])
        .assert()
        .success();

    let sequential = fs::read_to_string(temp_dir.path().join("sequential_result.json")).unwrap();
    let parallel = fs::read_to_string(temp_dir.path().join("parallel_result.json")).unwrap();
    assert_eq!(sequential, parallel);

    let sorted: Value = serde_json::from_str(&parallel).unwrap();
    assert_eq!(sorted[0]["email"], "0@example.com");
    assert_eq!(sorted[1]["email"], "5@example.com");
}

#[test]
fn test_records_missing_input_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    parspeed()
        .current_dir(temp_dir.path())
        .args(["records", "--input", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_grayscale_writes_both_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.png");
    image::RgbaImage::from_fn(32, 24, |x, y| image::Rgba([(x * 8) as u8, (y * 10) as u8, 90, 255]))
        .save(&input)
        .unwrap();

    parspeed()
        .current_dir(temp_dir.path())
        .args([
            "grayscale",
            "--input",
            "input.png",
            "--sequential-output",
            "seq.png",
            "--parallel-output",
            "par.png",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("32x24"));

    let sequential = image::open(temp_dir.path().join("seq.png")).unwrap().to_luma8();
    let parallel = image::open(temp_dir.path().join("par.png")).unwrap().to_luma8();
    assert_eq!(sequential.as_raw(), parallel.as_raw());
}

#[test]
fn test_grayscale_undecodable_input_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("input.jpg"), b"not an image").unwrap();

    parspeed()
        .current_dir(temp_dir.path())
        .arg("grayscale")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode image"));
}

#[test]
fn test_fetch_counts_unreachable_endpoint_as_error() {
    // Nothing listens on the discard port, so the request fails without leaving the host
    let report = json_report(parspeed().args([
        "--format",
        "json",
        "fetch",
        "--endpoint",
        "http://127.0.0.1:9/users",
    ]));

    let details = report[0]["details"].as_array().unwrap();
    let value = |label: &str| {
        details
            .iter()
            .find(|d| d["label"] == label)
            .map(|d| d["value"].as_str().unwrap().to_string())
            .unwrap()
    };
    assert_eq!(value("Parallel errors"), "1");
    assert_eq!(value("Sequential errors"), "1");
    assert_eq!(value("Parallel records fetched"), "0");
}

#[test]
fn test_config_env_override() {
    parspeed()
        .env("PARSPEED_MATRIX__SIZE", "7")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("size = 7"))
        .stdout(predicate::str::contains("[pi]"));
}

#[test]
fn test_missing_config_file_is_fatal() {
    parspeed()
        .args(["--config", "does-not-exist.toml", "pi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

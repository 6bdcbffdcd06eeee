use std::path::PathBuf;
use std::process::{Command, Output};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tagsf"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn toy(extra: &[&str]) -> Output {
    let mut args = vec!["toy", "--calibration", "particlenet-xbb", "--period", "2018", "-n", "2000"];
    args.extend_from_slice(extra);
    run(&args)
}

fn summary(out: &Output) -> serde_json::Value {
    assert!(out.status.success(), "stderr:\n{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).expect("stdout should be JSON")
}

#[test]
fn toy_three_category_conserves_objects() {
    let v = summary(&toy(&[]));
    assert_eq!(v["categories"], serde_json::json!(["Fail", "Loose", "Tight"]));
    assert_eq!(v["origin_total"], 2000);
    assert_eq!(v["result_total"], 2000);
}

#[test]
fn toy_is_reproducible() {
    let a = toy(&["--variation", "down"]);
    let b = toy(&["--variation", "down"]);
    assert_eq!(summary(&a), summary(&b));
}

#[test]
fn toy_two_category_with_loose_pass_row() {
    let v = summary(&toy(&["--mode", "two", "--pass-row", "loose", "--eff-tight", "0.2"]));
    assert_eq!(v["categories"], serde_json::json!(["Fail", "Pass"]));
    assert_eq!(v["result_total"], 2000);
}

#[test]
fn toy_neutral_calibration_leaves_counts_unchanged() {
    let out = run(&["toy", "--calibration", "photon-saa", "--period", "2016APV", "-n", "500"]);
    let v = summary(&out);
    assert_eq!(v["origin_counts"], v["result_counts"]);
}

#[test]
fn toy_text_summary() {
    let out = toy(&["--text"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("Number of Original"), "{text}");
    assert!(text.contains("Total: 2000"), "{text}");
}

#[test]
fn toy_rejects_invalid_efficiencies() {
    let out = toy(&["--eff-loose", "0.7", "--eff-tight", "0.4"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("efficiencies"), "stderr: {stderr}");
}

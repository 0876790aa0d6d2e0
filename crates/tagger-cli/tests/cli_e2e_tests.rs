//! CLI end-to-end tests that invoke the compiled `tagger` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BUCKET_YAML: &str = "\
Resources:
  Bucket:
    Type: AWS::S3::Bucket
    Properties:
      BucketName: data
";

const QUEUE_YAML: &str = "\
Resources:
  Queue:
    Type: AWS::SQS::Queue
";

const BUCKET_TF: &str = "\
resource \"aws_s3_bucket\" \"data\" {
  bucket = \"data\"
}
";

/// Get a Command for the tagger binary with a clean environment
fn tagger_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tagger").expect("Failed to find tagger binary");
    cmd.env("NO_COLOR", "1").env_remove("TAGGER_POLICY").env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Help and usage
// ============================================================================

#[test]
fn test_help_lists_commands() {
    tagger_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("patch"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("policy"));
}

#[test]
fn test_version_flag() {
    tagger_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_patch_without_files_is_usage_error() {
    tagger_cmd().arg("patch").assert().code(2);
}

#[test]
fn test_unknown_preset_is_usage_error() {
    tagger_cmd()
        .args(["policy", "--preset", "audit"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("audit"));
}

// ============================================================================
// patch
// ============================================================================

#[test]
fn test_patch_writes_tags_and_reports() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "stack.yaml", BUCKET_YAML);

    tagger_cmd()
        .arg("patch")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Patched (YAML):"))
        .stdout(predicate::str::contains("1 file(s) patched, 2 tag(s) added, 0 skipped"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("      Tags:\n        - Key: data_classification\n"));
    assert!(written.contains("Value: \"{{resolve:ssm:/DataCategory/CHANGE_ME}}\""));

    tagger_cmd()
        .arg("patch")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No data storage definitions found (YAML):"));
    assert_eq!(fs::read_to_string(&path).unwrap(), written);
}

#[test]
fn test_patch_dry_run_prints_diff_without_writing() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "main.tf", BUCKET_TF);

    tagger_cmd()
        .args(["patch", "--dry-run"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would patch (TF):"))
        .stdout(predicate::str::contains("+  tags = {"))
        .stdout(predicate::str::contains("@@"))
        .stdout(predicate::str::contains("1 file(s) would change, 2 tag(s) to add"));

    assert_eq!(fs::read_to_string(&path).unwrap(), BUCKET_TF);
}

#[test]
fn test_patch_skips_unknown_and_missing_files() {
    let dir = TempDir::new().unwrap();
    let notes = write(dir.path(), "notes.txt", "Resources:\n");
    let missing = dir.path().join("gone.yaml");

    tagger_cmd()
        .arg("patch")
        .arg(&notes)
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip (unknown type):"))
        .stdout(predicate::str::contains("Skip (unreadable YAML):"))
        .stdout(predicate::str::contains("0 file(s) patched, 0 tag(s) added, 2 skipped"));
}

#[test]
fn test_governance_skips_test_paths() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "tests/stack.yaml", BUCKET_YAML);

    tagger_cmd()
        .args(["patch", "--preset", "governance"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip (path contains \"test\"):"));

    assert_eq!(fs::read_to_string(&path).unwrap(), BUCKET_YAML);
}

#[test]
fn test_patch_json_report() {
    let dir = TempDir::new().unwrap();
    let bucket = write(dir.path(), "bucket.yaml", BUCKET_YAML);
    let queue = write(dir.path(), "queue.yaml", QUEUE_YAML);

    let output = tagger_cmd()
        .args(["patch", "--json"])
        .arg(&bucket)
        .arg(&queue)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["outcome"]["status"], "patched");
    assert_eq!(files[0]["kind"], "cloudformation-yaml");
    assert_eq!(files[1]["outcome"]["status"], "unchanged");
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_fails_when_tags_missing() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "stack.yaml", BUCKET_YAML);

    tagger_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Would patch (YAML):"))
        .stdout(predicate::str::contains("1 file(s) need tags"));

    assert_eq!(fs::read_to_string(&path).unwrap(), BUCKET_YAML);
}

#[test]
fn test_check_passes_after_patch() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "stack.yaml", BUCKET_YAML);

    tagger_cmd().arg("patch").arg(&path).assert().success();
    tagger_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("All templates carry the required tags"));
}

// ============================================================================
// policy
// ============================================================================

#[test]
fn test_policy_prints_preset() {
    tagger_cmd()
        .args(["policy", "--preset", "governance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exclude_paths"))
        .stdout(predicate::str::contains("\"test\""))
        .stdout(predicate::str::contains("AWS::DynamoDB::GlobalTable"));
}

#[test]
fn test_policy_file_from_env() {
    let dir = TempDir::new().unwrap();
    let policy = write(
        dir.path(),
        "policy.toml",
        "[[tags]]\nkey = \"owner\"\nvalue = \"platform\"\n",
    );
    let stack = write(dir.path(), "stack.yaml", BUCKET_YAML);

    tagger_cmd()
        .env("TAGGER_POLICY", &policy)
        .arg("patch")
        .arg(&stack)
        .assert()
        .success();

    let written = fs::read_to_string(&stack).unwrap();
    assert!(written.contains("- Key: owner\n          Value: \"platform\"\n"));
    assert!(!written.contains("data_classification"));
}

#[test]
fn test_invalid_policy_file_fails() {
    let dir = TempDir::new().unwrap();
    let policy = write(dir.path(), "policy.toml", "tags = []\n");
    let stack = write(dir.path(), "stack.yaml", BUCKET_YAML);

    tagger_cmd()
        .arg("patch")
        .arg("--policy")
        .arg(&policy)
        .arg(&stack)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least one tag is required"));

    assert_eq!(fs::read_to_string(&stack).unwrap(), BUCKET_YAML);
}

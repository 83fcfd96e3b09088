//! Integration tests for the contextforge CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn contextforge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("contextforge").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG").env_remove("CONTEXTFORGE_CONFIG");
    cmd
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("proj/src")).unwrap();
    fs::write(root.join("proj/.gitignore"), "ignored.txt\n").unwrap();
    fs::write(root.join("proj/ignored.txt"), "ignored").unwrap();
    fs::write(root.join("proj/file1.txt"), "Contents of file1").unwrap();
    fs::write(root.join("proj/src/main.py"), "print('hi')\n").unwrap();
    temp_dir
}

/// Test CLI responds to --help
#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    contextforge(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dataset-mode"))
        .stdout(predicate::str::contains("--cxml"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    contextforge(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("contextforge"));
}

#[test]
fn test_no_paths_succeeds_with_empty_output() {
    let temp_dir = TempDir::new().unwrap();
    contextforge(temp_dir.path()).assert().success().stdout("");
}

#[test]
fn test_default_text_output() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .arg("proj")
        .assert()
        .success()
        .stdout(predicate::str::contains("proj/file1.txt\n---\nContents of file1\n\n---\n\n"))
        .stdout(predicate::str::contains("proj/src/main.py"))
        .stdout(predicate::str::contains("ignored.txt").not())
        .stderr(predicate::str::contains("Processing complete!"));
}

#[test]
fn test_gitignore_bypass() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "--ignore-gitignore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("proj/ignored.txt"));
}

#[test]
fn test_extension_and_line_numbers() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "-e", "py", "-n"])
        .assert()
        .success()
        .stdout("proj/src/main.py\n---\n1  print('hi')\n\n---\n\n");
}

#[test]
fn test_xml_output() {
    let temp_dir = project();
    let assert = contextforge(temp_dir.path())
        .args(["proj", "--cxml"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.starts_with("<documents>\n<document index=\"1\">\n<source>proj/file1.txt</source>\n"));
    assert!(stdout.contains("<document index=\"2\">\n<source>proj/src/main.py</source>"));
    assert!(stdout.ends_with("</documents>\n"));
}

#[test]
fn test_json_output_is_valid() {
    let temp_dir = project();
    let assert = contextforge(temp_dir.path())
        .args(["proj", "--json"])
        .assert()
        .success();
    let parsed: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["path"], "proj/file1.txt");
    assert_eq!(entries[0]["content"], "Contents of file1");
}

#[test]
fn test_jsonl_output() {
    let temp_dir = project();
    let assert = contextforge(temp_dir.path())
        .args(["proj", "-l"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 2);
    for line in stdout.lines() {
        serde_json::from_str::<serde_json::Value>(line).unwrap();
    }
}

#[test]
fn test_dataset_mode() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "--dataset-mode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DATASET-MODE] Repository Tree Overview"))
        .stdout(predicate::str::contains("📂 src/"))
        .stdout(predicate::str::contains(
            "[SUMMARY] proj/file1.txt | 17 bytes | 1 lines | snippet: Contents of file1",
        ))
        .stdout(predicate::str::contains("===== FILE BEGIN: proj/src/main.py ====="));
}

#[test]
fn test_output_file() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "-j", "-o", "out.json"])
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(temp_dir.path().join("out.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_missing_path_fails_but_siblings_are_processed() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["missing_dir", "proj"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Contents of file1"))
        .stderr(predicate::str::contains(
            "Error processing missing_dir: No such file or directory",
        ));
}

#[test]
fn test_unreadable_gitignore_fails_its_root_only() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("bad")).unwrap();
    fs::create_dir_all(root.join("good")).unwrap();
    fs::write(root.join("bad/.gitignore"), b"#\xE9\n").unwrap();
    fs::write(root.join("bad/a.txt"), "a").unwrap();
    fs::write(root.join("good/b.txt"), "b").unwrap();

    contextforge(root)
        .args(["bad", "good"])
        .assert()
        .code(1)
        .stdout("good/b.txt\n---\nb\n\n---\n\n")
        .stderr(predicate::str::contains("Error processing bad/.gitignore"))
        .stderr(predicate::str::contains("1 of 2 paths could not be processed"));
}

#[test]
fn test_invalid_regex_is_a_usage_error() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "--regex", "(unclosed"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Invalid regex pattern: (unclosed"));
}

#[test]
fn test_multiple_formats_rejected() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "--cxml", "--jsonl"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Cannot use multiple output formats simultaneously"));
}

#[test]
fn test_invalid_date_rejected() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "--modified-after", "last tuesday"])
        .assert()
        .code(2);
}

#[test]
fn test_modified_after_filters_old_files() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "--modified-after", "2999-01-01"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_config_file_layering() {
    let temp_dir = project();
    fs::write(
        temp_dir.path().join("contextforge.toml"),
        "[scan]\nextensions = [\"py\"]\n\n[output]\nformat = \"jsonl\"\n",
    )
    .unwrap();

    // Working-directory config applies by default
    let assert = contextforge(temp_dir.path()).arg("proj").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("\"path\":\"proj/src/main.py\""));

    // Flags are appended to configured lists and replace the configured format
    contextforge(temp_dir.path())
        .args(["proj", "-e", "txt", "-c"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<documents>\n"))
        .stdout(predicate::str::contains("proj/file1.txt"))
        .stdout(predicate::str::contains("proj/src/main.py"));
}

#[test]
fn test_explicit_config_file() {
    let temp_dir = project();
    let config = temp_dir.path().join("forge.toml");
    fs::write(&config, "[scan]\nextensions = [\"txt\"]\n").unwrap();

    contextforge(temp_dir.path())
        .args(["proj", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("proj/file1.txt"))
        .stdout(predicate::str::contains("main.py").not());
}

#[test]
fn test_missing_config_file_is_a_usage_error() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "--config", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_environment_overrides() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .arg("proj")
        .env("CONTEXTFORGE_SCAN__IGNORE_GITIGNORE", "true")
        .env("CONTEXTFORGE_OUTPUT__FORMAT", "jsonl")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"path\":\"proj/ignored.txt\""));
}

#[test]
fn test_quiet_suppresses_progress() {
    let temp_dir = project();
    contextforge(temp_dir.path())
        .args(["proj", "-q"])
        .assert()
        .success()
        .stderr("");
}

#[test]
fn test_config_file_from_environment() {
    let temp_dir = project();
    fs::write(temp_dir.path().join("py-only.toml"), "[scan]\nextensions = [\"py\"]\n").unwrap();

    contextforge(temp_dir.path())
        .arg("proj")
        .env("CONTEXTFORGE_CONFIG", "py-only.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("proj/src/main.py"))
        .stdout(predicate::str::contains("file1.txt").not());
}

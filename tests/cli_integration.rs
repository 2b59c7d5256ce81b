//! CLI integration tests for modgraph.
//!
//! These tests drive the binary against manifests written to temporary
//! directories, from declaration through descriptor output.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const CBASE: &str = r#"
root = "cbase"

[modules.cbase]
path = "github.com/jurgen-kluft/cbase"
test-executable = true
dependencies = ["cunittest"]

[modules.cunittest]
path = "github.com/jurgen-kluft/cunittest"
test-library = true
test-framework = true
"#;

/// Get the modgraph binary command, isolated from the user's config.
fn modgraph(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modgraph").unwrap();
    cmd.env("HOME", home).env_remove("MODGRAPH_MANIFEST");
    cmd
}

/// Create a project directory holding `manifest`.
fn project(manifest: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Modgraph.toml"), manifest).unwrap();
    tmp
}

// ============================================================================
// modgraph generate
// ============================================================================

#[test]
fn test_generate_writes_json_to_stdout() {
    let tmp = project(CBASE);

    let output = modgraph(tmp.path())
        .args(["generate", "--compact"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["root"], "cbase");
    assert_eq!(json["modules"][0]["name"], "cunittest");
    assert_eq!(json["modules"][1]["test_executable"]["name"], "cbase_test");
}

#[test]
fn test_generate_to_file() {
    let tmp = project(CBASE);
    let out = tmp.path().join("descriptor.json");

    modgraph(tmp.path())
        .args(["generate", "--output"])
        .arg(&out)
        .current_dir(tmp.path())
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("\"cunittest_test_lib\""));
    assert!(content.contains("\n  \"root\": \"cbase\""));
}

#[test]
fn test_generate_uses_repository_config() {
    let tmp = project("root = \"app\"\n[modules.app]\n");
    let config_dir = tmp.path().join(".modgraph");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[repository]\nowner = \"jurgen-kluft\"\n",
    )
    .unwrap();

    modgraph(tmp.path())
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("github.com/jurgen-kluft/app"));
}

#[test]
fn test_generate_from_subdirectory_and_manifest_path() {
    let tmp = project(CBASE);
    let nested = tmp.path().join("source").join("main");
    fs::create_dir_all(&nested).unwrap();

    modgraph(tmp.path())
        .args(["generate"])
        .current_dir(&nested)
        .assert()
        .success();

    let elsewhere = TempDir::new().unwrap();
    modgraph(elsewhere.path())
        .args(["fingerprint", "--manifest-path"])
        .arg(tmp.path().join("Modgraph.toml"))
        .current_dir(elsewhere.path())
        .assert()
        .success();
}

// ============================================================================
// errors
// ============================================================================

#[test]
fn test_missing_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    modgraph(tmp.path())
        .args(["tree"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find Modgraph.toml"));
}

#[test]
fn test_cycle_reported_as_diagnostic() {
    let tmp = project(
        "root = \"a\"\n[modules.a]\ndependencies = [\"b\"]\n[modules.b]\ndependencies = [\"a\"]\n",
    );

    modgraph(tmp.path())
        .args(["--no-color", "generate"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cycle: a -> b -> a"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_diagnostic_color_follows_flag() {
    let tmp = project("root = \"a\"\n[modules.a]\ndependencies = [\"ghost\"]\n");

    modgraph(tmp.path())
        .args(["tree"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("\x1b[1;31merror\x1b[0m"));

    modgraph(tmp.path())
        .args(["--no-color", "tree"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_unknown_module_reported() {
    let tmp = project("root = \"a\"\n[modules.a]\ndependencies = [\"ghost\"]\n");

    modgraph(tmp.path())
        .args(["--no-color", "tree"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find module `ghost`"));
}

// ============================================================================
// modgraph tree / linkplan / fingerprint
// ============================================================================

#[test]
fn test_tree() {
    let tmp = project(CBASE);

    modgraph(tmp.path())
        .args(["tree", "--artifacts"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "cbase (github.com/jurgen-kluft/cbase)\n",
        ))
        .stdout(predicate::str::contains("cbase_test [test executable]"))
        .stdout(predicate::str::contains("├── cunittest"))
        .stdout(predicate::str::contains("[test framework]"));
}

#[test]
fn test_linkplan() {
    let tmp = project(CBASE);

    modgraph(tmp.path())
        .args(["linkplan", "cbase"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Link order for 'cbase_test'"))
        .stdout(predicate::str::contains("From: cunittest (test library)"));

    modgraph(tmp.path())
        .args(["linkplan", "cbase", "--artifact", "test-lib"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no test library"));

    modgraph(tmp.path())
        .args(["linkplan", "nope"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the registry"));
}

#[test]
fn test_fingerprint_is_stable() {
    let tmp = project(CBASE);

    let run = || {
        let output = modgraph(tmp.path())
            .arg("fingerprint")
            .current_dir(tmp.path())
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    let first = run();
    assert_eq!(first.trim().len(), 64);
    assert_eq!(first, run());
}

#[test]
fn test_completions() {
    let tmp = TempDir::new().unwrap();

    modgraph(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("modgraph"));
}

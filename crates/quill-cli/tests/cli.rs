//! End-to-end tests for the `quill` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quill(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("quill").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--no-color");
    for (key, _) in std::env::vars() {
        if key.starts_with("QUILL_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (path, content) in files {
        let path = temp.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    temp
}

#[test]
fn generate_documents_matching_files() {
    let temp = project(&[
        ("src/math.ts", "export function add(a: number, b: number): number {\n  return a + b;\n}\n"),
        ("src/notes.md", "function ignored() {}\n"),
    ]);

    quill(temp.path())
        .args(["generate", "src/**/*", "--no-examples"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 1 file(s)"))
        .stderr(predicate::str::contains("All done!"));

    let math = fs::read_to_string(temp.path().join("src/math.ts")).unwrap();
    assert!(math.starts_with("/**\n * @param a {number}\n * @param b {number}\n"));
    assert!(!math.contains("@example"));
    assert_eq!(
        fs::read_to_string(temp.path().join("src/notes.md")).unwrap(),
        "function ignored() {}\n"
    );
}

#[test]
fn generate_twice_changes_nothing_the_second_time() {
    let temp = project(&[("lib.js", "class Queue {\n  push(item) {}\n}\n")]);

    quill(temp.path()).args(["generate", "lib.js"]).assert().success();
    let first = fs::read_to_string(temp.path().join("lib.js")).unwrap();

    quill(temp.path())
        .args(["generate", "lib.js"])
        .assert()
        .success()
        .stderr(predicate::str::contains("0 comment(s) added"));
    assert_eq!(fs::read_to_string(temp.path().join("lib.js")).unwrap(), first);
}

#[test]
fn dry_run_leaves_files_alone() {
    let source = "function a() {}\n";
    let temp = project(&[("a.ts", source)]);

    quill(temp.path())
        .args(["generate", "a.ts", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("dry run"));
    assert_eq!(fs::read_to_string(temp.path().join("a.ts")).unwrap(), source);
}

#[test]
fn clean_removes_garbage_and_writes_backup() {
    let source = "// TODO\nconst a = 1;\n// ======\nconst b = 2; //\n";
    let temp = project(&[("a.js", source)]);

    quill(temp.path())
        .args(["clean", "a.js", "--backup"])
        .assert()
        .success()
        .stderr(predicate::str::contains("3 comment(s) removed"));

    assert_eq!(
        fs::read_to_string(temp.path().join("a.js")).unwrap(),
        "const a = 1;\nconst b = 2;\n"
    );
    assert_eq!(fs::read_to_string(temp.path().join("a.js.bak")).unwrap(), source);
}

#[test]
fn all_cleans_then_generates() {
    let temp = project(&[("a.ts", "/** */\nfunction a() {}\n")]);

    quill(temp.path())
        .args(["all", "a.ts", "--no-examples"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Comment cleanup completed"))
        .stderr(predicate::str::contains("Comment generation completed"));

    let out = fs::read_to_string(temp.path().join("a.ts")).unwrap();
    assert_eq!(out, "/**\n * @returns {void}\n */\nfunction a() {}\n");
}

#[test]
fn unparsable_file_is_skipped_and_run_completes() {
    let garbage = ")))\n".repeat(64);
    let temp = project(&[("bad.ts", garbage.as_str()), ("good.ts", "function g() {}\n")]);

    let assert = quill(temp.path()).args(["generate", "*.ts"]).assert().success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("All done!"));

    let good = fs::read_to_string(temp.path().join("good.ts")).unwrap();
    assert!(good.starts_with("/**"));
    assert_eq!(fs::read_to_string(temp.path().join("bad.ts")).unwrap(), garbage);
}

#[test]
fn broken_statement_does_not_block_generation() {
    let temp = project(&[("mixed.ts", "function ok() {}\nlet x = ;\n")]);

    quill(temp.path()).args(["generate", "mixed.ts"]).assert().success();

    let out = fs::read_to_string(temp.path().join("mixed.ts")).unwrap();
    assert!(out.starts_with("/**"));
    assert!(out.contains("*/\nfunction ok() {}\nlet x = ;\n"));
}

#[test]
fn no_matches_still_completes() {
    let temp = project(&[]);
    quill(temp.path())
        .args(["generate", "src/**/*.ts"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No files found"))
        .stderr(predicate::str::contains("All done!"));
}

#[test]
fn config_file_settings_apply() {
    let temp = project(&[
        ("quill.config.json", r#"{ "includeTypes": false, "includeExamples": false }"#),
        ("a.ts", "function a(x: string) {}\n"),
    ]);

    quill(temp.path()).args(["generate", "a.ts"]).assert().success();

    let out = fs::read_to_string(temp.path().join("a.ts")).unwrap();
    assert!(out.contains(" * @param x\n"));
    assert!(out.contains(" * @returns\n"));
}

#[test]
fn explicit_missing_config_fails() {
    let temp = project(&[("a.ts", "function a() {}\n")]);
    quill(temp.path())
        .args(["--config", "missing.json", "generate", "a.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn custom_templates_are_used() {
    let temp = project(&[
        ("templates.json", r#"{ "functionTemplate": "/** {{name}} does things */" }"#),
        ("a.ts", "function run() {}\n"),
    ]);

    quill(temp.path())
        .args(["generate", "a.ts", "--templates", "templates.json"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("a.ts")).unwrap(),
        "/** run does things */\nfunction run() {}\n"
    );
}

#[test]
fn analyze_prints_json() {
    let temp = project(&[("src/a.ts", "export const limit = 3;\nasync function load(url: string) {}\n")]);

    let assert = quill(temp.path()).args(["analyze", "src"]).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json[0]["path"], "src/a.ts");
    assert_eq!(json[0]["variables"][0]["name"], "limit");
    assert_eq!(json[0]["functions"][0]["name"], "load");
    assert_eq!(json[0]["functions"][0]["isAsync"], true);
}

#[test]
fn init_writes_config_once() {
    let temp = project(&[]);

    quill(temp.path())
        .args(["init", "--renderer", "fixed"])
        .assert()
        .success();
    let written = fs::read_to_string(temp.path().join("quill.config.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["renderer"], "fixed");
    assert_eq!(json["type"], "documentation");

    quill(temp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    quill(temp.path()).args(["init", "--force"]).assert().success();
}

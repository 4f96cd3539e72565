use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const START: &str = "<!-- secrules:start -->";
const END: &str = "<!-- secrules:end -->";

/// A command running in `dir` with user configuration isolated to it.
fn secrules(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("secrules").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("SECRULES_LOG");
    cmd
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_help_lists_subcommands() {
    let dir = tempdir().unwrap();
    secrules(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_generate_appends_to_existing_claude_file() {
    let dir = tempdir().unwrap();
    let claude = dir.path().join("CLAUDE.md");
    fs::write(&claude, "# My Project\n\nSome content.").unwrap();

    secrules(dir.path())
        .args(["generate", "--target", "claude", "--category", "access-control"])
        .assert()
        .success()
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("CLAUDE.md"));

    let content = fs::read_to_string(&claude).unwrap();
    assert!(content.starts_with("# My Project\n\nSome content.\n\n"));
    assert!(content.contains("## AC-01 Broken Access Control"));
    assert_eq!(count(&content, START), 1);
    assert_eq!(count(&content, END), 1);
}

#[test]
fn test_missing_templates_fail_without_writing() {
    let dir = tempdir().unwrap();
    let templates = dir.path().join("my-templates");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("injection.md"), "# Injection\n").unwrap();

    secrules(dir.path())
        .args(["generate", "--target", "claude", "--target", "cursor"])
        .args(["--category", "access-control", "--templates"])
        .arg(&templates)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no security rule templates found"));

    assert!(!dir.path().join("CLAUDE.md").exists());
    assert!(!dir.path().join(".cursor").exists());
}

#[test]
fn test_framework_change_replaces_region_and_keeps_user_text() {
    let dir = tempdir().unwrap();
    let agents = dir.path().join("AGENTS.md");

    secrules(dir.path())
        .args(["generate", "-t", "agents", "-c", "injection", "-f", "vanilla"])
        .assert()
        .success();
    let first = fs::read_to_string(&agents).unwrap();
    fs::write(&agents, format!("{first}\n# Other stuff\n")).unwrap();

    secrules(dir.path())
        .args(["generate", "-t", "agents", "-c", "injection", "-f", "react"])
        .assert()
        .success();

    let content = fs::read_to_string(&agents).unwrap();
    assert_eq!(count(&content, START), 1);
    assert!(content.contains("framework: react"));
    assert!(!content.contains("framework: vanilla"));
    assert!(content.contains("# Other stuff"));
}

#[test]
fn test_cursor_rules_are_rewritten_not_duplicated() {
    let dir = tempdir().unwrap();
    let rules = dir.path().join(".cursor/rules");

    for _ in 0..2 {
        secrules(dir.path())
            .args(["generate", "--target", "cursor", "--category", "ssrf"])
            .assert()
            .success();
    }

    let names: Vec<String> = fs::read_dir(&rules)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["security-ssrf.mdc"]);

    let rule = fs::read_to_string(rules.join("security-ssrf.mdc")).unwrap();
    assert!(rule.starts_with("---\n"));
    assert!(rule.contains("alwaysApply:"));
    assert!(!dir.path().join("CLAUDE.md").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();

    secrules(dir.path())
        .args(["generate", "--dry-run", "-t", "claude", "-t", "windsurf", "-m", "directory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains(".windsurf/rules/security-injection.md"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unterminated_region_fails_only_that_target() {
    let dir = tempdir().unwrap();
    let broken = format!("# Notes\n\n{START}\nhalf written");
    fs::write(dir.path().join("GEMINI.md"), &broken).unwrap();

    secrules(dir.path())
        .args(["generate", "-t", "gemini", "-t", "copilot", "-c", "cryptography"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Skipped gemini"));

    assert_eq!(
        fs::read_to_string(dir.path().join("GEMINI.md")).unwrap(),
        broken
    );
    assert!(dir.path().join(".github/copilot-instructions.md").exists());
}

#[test]
fn test_remove_round_trip() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("CLAUDE.md"), "# My Project\n").unwrap();

    secrules(dir.path())
        .args(["generate", "-t", "claude", "-t", "cursor", "-t", "copilot", "-m", "directory"])
        .assert()
        .success();

    secrules(dir.path())
        .arg("remove")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed generated security rules"));

    assert_eq!(
        fs::read_to_string(dir.path().join("CLAUDE.md")).unwrap(),
        "# My Project\n"
    );
    assert!(!dir.path().join(".github/copilot-instructions.md").exists());
    assert_eq!(
        fs::read_dir(dir.path().join(".cursor/rules")).unwrap().count(),
        0
    );

    secrules(dir.path())
        .arg("remove")
        .assert()
        .success()
        .stdout(predicate::str::contains("No generated security rules found"));
}

#[test]
fn test_saved_defaults_are_used() {
    let dir = tempdir().unwrap();

    secrules(dir.path())
        .args(["generate", "-t", "windsurf", "-c", "ssrf", "-f", "flask", "--save-defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved defaults"));
    fs::remove_dir_all(dir.path().join(".windsurf")).unwrap();

    let saved = fs::read_to_string(dir.path().join(".secrules.json")).unwrap();
    assert!(saved.contains("\"windsurf\""));

    secrules(dir.path()).arg("generate").assert().success();
    let rule = fs::read_to_string(dir.path().join(".windsurf/rules/security-ssrf.md")).unwrap();
    assert!(rule.starts_with("---\ntrigger:"));
    assert!(!dir.path().join("CLAUDE.md").exists());
}

#[test]
fn test_failed_run_does_not_save_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("GEMINI.md"), format!("{START}\n")).unwrap();

    secrules(dir.path())
        .args(["generate", "-t", "gemini", "-c", "ssrf", "--save-defaults"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Saved defaults").not());

    assert!(!dir.path().join(".secrules.json").exists());
}

#[test]
fn test_detection_picks_existing_targets() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("GEMINI.md"), "# Gemini\n").unwrap();

    secrules(dir.path())
        .args(["generate", "-c", "injection"])
        .assert()
        .success();

    let gemini = fs::read_to_string(dir.path().join("GEMINI.md")).unwrap();
    assert_eq!(count(&gemini, START), 1);
    assert!(!dir.path().join("CLAUDE.md").exists());
}

#[test]
fn test_interactive_answers() {
    let dir = tempdir().unwrap();

    secrules(dir.path())
        .args(["generate", "--interactive"])
        .write_stdin("copilot\n5\nexpress\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Which assistants"));

    let copilot =
        fs::read_to_string(dir.path().join(".github/copilot-instructions.md")).unwrap();
    assert!(copilot.contains("IN-01 Injection"));
    assert!(copilot.contains("framework: express"));
    assert!(!copilot.contains("AC-01"));
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".secrules.json"), "{ nope").unwrap();

    secrules(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains(".secrules.json"));
    assert!(!dir.path().join("CLAUDE.md").exists());
}

#[test]
fn test_list_json() {
    let dir = tempdir().unwrap();
    let output = secrules(dir.path())
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["targets"].as_array().unwrap().len(), 6);
    assert_eq!(value["categories"].as_array().unwrap().len(), 10);
    assert_eq!(value["targets"][4]["directory"], ".cursor/rules");
}

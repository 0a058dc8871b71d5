use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn daolog() -> Command {
    let mut cmd = Command::cargo_bin("daolog").unwrap();
    // Keep the ambient context out of the way unless a test sets it.
    cmd.env_remove("QUERY_STRING").env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &tempfile::TempDir, log: &std::path::Path, extra: &str) -> PathBuf {
    let toml = format!(
        "[logger]\nfile = {:?}\n{extra}\n",
        log.display().to_string()
    );
    let path = dir.path().join("daolog.toml");
    fs::write(&path, toml).unwrap();
    path
}

#[rstest]
#[case("debug", "(DBG)")]
#[case("info", "(IFO)")]
#[case("error", "(ERR)")]
#[case("fatal", "(DIE)")]
fn tagged_commands_append_a_line(#[case] cmd_name: &str, #[case] tag: &str) {
    let dir = tempdir().unwrap();
    let log = dir.path().join("app.log");
    fs::write(&log, "").unwrap();

    // Error and fatal sit at critical, so open the gate that far.
    daolog()
        .arg("--file")
        .arg(&log)
        .args(["--level", "critical", cmd_name, "hello", "world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("written"));

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.starts_with(tag), "got: {content}");
    assert!(content.ends_with("<> hello world\n"), "got: {content}");
}

#[rstest]
#[case(&["error", "m"], false)]
#[case(&["fatal", "m"], false)]
#[case(&["--level", "debug", "info", "m"], false)]
#[case(&["--level", "debug", "debug", "m"], true)]
#[case(&["--level", "-100", "fatal", "m"], true)]
#[case(&["--level", "-99", "fatal", "m"], false)]
#[case(&["raw", "m", "--at", "150"], true)]
#[case(&["--level", "diagnostic", "raw", "m", "--at", "99"], false)]
fn gate_is_applied(#[case] args: &[&str], #[case] written: bool) {
    let dir = tempdir().unwrap();
    let log = dir.path().join("app.log");
    fs::write(&log, "").unwrap();

    let out = daolog()
        .arg("--file")
        .arg(&log)
        .arg("--json")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["written"], written);
    assert_eq!(fs::read_to_string(&log).unwrap().is_empty(), !written);
}

#[test]
fn first_use_announces_new_file() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("new.log");

    daolog()
        .arg("--file")
        .arg(&log)
        .args(["info", "ready"])
        .assert()
        .success();

    let content = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("(IFO) [") && lines[0].ends_with("<> Log file created."));
    assert!(lines[1].ends_with("<> ready"));
}

#[test]
fn raw_writes_verbatim() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("app.log");
    fs::write(&log, "").unwrap();

    daolog()
        .arg("--file")
        .arg(&log)
        .args(["raw", "no newline"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&log).unwrap(), "no newline");
}

#[test]
fn query_string_is_the_ambient_source() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("app.log");
    fs::write(&log, "").unwrap();

    daolog()
        .env("QUERY_STRING", "action=list&page=2")
        .arg("--file")
        .arg(&log)
        .args(["info", "listing"])
        .assert()
        .success();

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.ends_with("<action=list&page=2> listing\n"), "got: {content}");
}

#[test]
fn source_flag_beats_ambient_context() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("app.log");
    fs::write(&log, "").unwrap();

    daolog()
        .env("QUERY_STRING", "ignored=1")
        .arg("--file")
        .arg(&log)
        .args(["--level", "critical", "--source", "cron", "error", "failed"])
        .assert()
        .success();

    assert!(fs::read_to_string(&log).unwrap().ends_with("<cron> failed\n"));
}

#[test]
fn config_file_supplies_level_source_and_context_var() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("cfg.log");
    fs::write(&log, "").unwrap();
    let cfg = write_config(
        &dir,
        &log,
        "level = \"critical\"\n[context]\nenv_var = \"DAOLOG_REQ\"",
    );

    daolog()
        .env("DAOLOG_REQ", "req-9")
        .arg("--config")
        .arg(&cfg)
        .args(["error", "e1"])
        .assert()
        .success();

    // EMERGENCY-valued raw call is below the critical threshold.
    daolog()
        .arg("--config")
        .arg(&cfg)
        .args(["raw", "x", "--at", "emergency"])
        .assert()
        .success()
        .stdout(predicate::str::contains("suppressed"));

    let content = fs::read_to_string(&log).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.ends_with("<req-9> e1\n"));
}

#[test]
fn check_reports_resolved_settings_without_writing() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("unused.log");

    let out = daolog()
        .env("QUERY_STRING", "id=5")
        .arg("--file")
        .arg(&log)
        .args(["--level", "150", "--json", "check"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["level"], 150);
    assert_eq!(v["source"], "id=5");
    assert_eq!(v["context_var"], "QUERY_STRING");
    assert!(!log.exists());
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["info", "m"], 2, "invalid configuration", "stderr")]
#[case(&["--file", "x.log", "info"], 2, "required", "stderr")]
#[case(&["--file", "x.log", "--level", "loud", "check"], 2, "unknown log level", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let assert = daolog().current_dir(dir.path()).args(args).assert().code(exit_code);

    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn unopenable_file_exits_with_open_failure() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("plain.txt");
    fs::write(&blocker, "kept\n").unwrap();
    let bad = blocker.join("app.log");

    daolog()
        .arg("--file")
        .arg(&bad)
        .args(["info", "m"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Could not open the log file"));

    assert_eq!(fs::read_to_string(&blocker).unwrap(), "kept\n");
}

#[test]
fn unknown_level_in_config_is_a_config_error() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("x.log");
    let cfg = write_config(&dir, &log, "level = \"loud\"");

    daolog()
        .arg("--config")
        .arg(&cfg)
        .args(["info", "m"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown log level"));
    assert!(!log.exists());
}

#[test]
fn diag_file_receives_tool_diagnostics() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("app.log");
    let diag = dir.path().join("diag.log");
    fs::write(&log, "").unwrap();

    daolog()
        .arg("--file")
        .arg(&log)
        .arg("--diag-file")
        .arg(&diag)
        .args(["--log-level", "info", "info", "m"])
        .assert()
        .success();

    let text = fs::read_to_string(&diag).unwrap();
    assert!(text.contains("line appended"), "got: {text}");
}

#[test]
fn unusable_diag_file_exits_cleanly() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("app.log");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    daolog()
        .arg("--file")
        .arg(&log)
        .arg("--diag-file")
        .arg(blocker.join("sub").join("diag.log"))
        .args(["info", "m"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot open diagnostics file"))
        .stderr(predicate::str::contains("panicked").not());
    // Diagnostics are set up before the logger, so nothing was logged.
    assert!(!log.exists());
}

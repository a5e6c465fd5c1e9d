use assert_cmd::Command;
use predicates::prelude::*;

/// A binary pointed at a config file that does not exist, so the user's own
/// settings never leak into the run.
fn msgstore(temp_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("msgstore").unwrap();
    cmd.arg("--config")
        .arg(temp_dir.path().join("config.json"))
        .arg("--no-color")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_lists_sample_directories() {
    let temp_dir = tempfile::tempdir().unwrap();
    msgstore(&temp_dir)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Directories"))
        .stdout(predicate::str::contains("Work"))
        .stdout(predicate::str::contains("Travel"))
        .stdout(predicate::str::contains("msgstore> "));
}

#[test]
fn test_empty_flag_starts_blank() {
    let temp_dir = tempfile::tempdir().unwrap();
    msgstore(&temp_dir)
        .arg("--empty")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No directories yet."))
        .stdout(predicate::str::contains("Work").not());
}

#[test]
fn test_create_open_and_add_message() {
    let temp_dir = tempfile::tempdir().unwrap();
    msgstore(&temp_dir)
        .arg("--empty")
        .write_stdin("new\nGroceries\nopen 1\nnew eggs and milk\nback\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory created: Groceries"))
        .stdout(predicate::str::contains("Groceries> "))
        .stdout(predicate::str::contains("Message added to Groceries: eggs and milk"));
}

#[test]
fn test_delete_is_confirmed() {
    let temp_dir = tempfile::tempdir().unwrap();
    msgstore(&temp_dir)
        .write_stdin("delete 2\nno\ndelete 2\ny\nls\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."))
        .stdout(predicate::str::contains("Directory deleted: Personal"))
        .stdout(predicate::str::contains("1 message removed with it"));
}

#[test]
fn test_config_file_controls_seeding_and_dates() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("custom.json");
    std::fs::write(&config, r#"{ "seed_sample_data": false, "date_format": "[%Y]" }"#).unwrap();

    let mut cmd = Command::cargo_bin("msgstore").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .arg("--no-color")
        .write_stdin("new Inbox\nopen 1\nnew hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work").not())
        .stdout(predicate::str::is_match(r"hello\s+\[\d{4}\]").unwrap());
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("broken.json");
    std::fs::write(&config, r#"{ "date_format": "" }"#).unwrap();

    let mut cmd = Command::cargo_bin("msgstore").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .write_stdin("quit\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: "));
}

#[test]
fn test_json_dump() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = msgstore(&temp_dir).arg("--json").output().unwrap();
    assert!(output.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Work", "Personal", "Ideas", "Travel"]);
    assert_eq!(listed[0]["message_count"], 2);
}

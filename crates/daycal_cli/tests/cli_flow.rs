use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn daycal(db: &Path) -> Command {
    daycal_as(db, "ana")
}

fn daycal_as(db: &Path, owner: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("daycal"));
    cmd.arg("--db").arg(db).args(["--owner", owner]);
    cmd
}

fn first_token(output: &[u8]) -> String {
    String::from_utf8_lossy(output)
        .split_whitespace()
        .next()
        .unwrap()
        .to_string()
}

#[test]
fn month_view_renders_grid_header() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("daycal.sqlite3");

    daycal(&db)
        .args(["month", "2024-02-14"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("febrero de 2024\n"))
        .stdout(predicate::str::contains("lun"))
        .stdout(predicate::str::contains("(29)"));
}

#[test]
fn month_offset_moves_by_whole_months() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("daycal.sqlite3");

    daycal(&db)
        .args(["month", "2024-01-31", "--offset", "-2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("noviembre de 2023\n"));
}

#[test]
fn tasks_show_up_in_agenda_and_block_category_removal() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("daycal.sqlite3");

    let output = daycal(&db)
        .args(["category", "add", "Trabajo"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let category = first_token(&output.stdout);

    let output = daycal(&db)
        .args([
            "task",
            "add",
            "Informe",
            "--date",
            "2024-03-05",
            "--category",
            &category,
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let task = first_token(&output.stdout);

    daycal(&db)
        .args(["agenda", "--start", "2024-03-04", "--days", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Informe (Trabajo, #dc2626)"));

    daycal(&db)
        .args(["category", "rm", &category])
        .assert()
        .failure()
        .stderr(predicate::str::contains("still has tasks assigned"));

    daycal(&db)
        .args(["task", "done", &task])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"));

    daycal(&db)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trabajo (1 tasks, 0 pending)"));
}

#[test]
fn agenda_rejects_zero_days() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("daycal.sqlite3");

    daycal(&db)
        .args(["agenda", "--days", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn note_show_resolves_copy_markers() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("daycal.sqlite3");

    let output = daycal(&db)
        .args(["note", "add", "Wifi", "Red [copy:casa-5g] clave [copy:Clave|abc123]"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let note = first_token(&output.stdout);

    daycal(&db)
        .args(["note", "show", &note])
        .assert()
        .success()
        .stdout(predicate::str::contains("Red casa-5g clave abc123"))
        .stdout(predicate::str::contains("[Clave] abc123"));

    daycal(&db)
        .args(["note", "list", "--query", "ABC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wifi"));

    daycal_as(&db, "bea")
        .args(["note", "show", &note])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note not found"));
}

#[test]
fn config_file_sets_locale_and_owner() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("daycal.json");
    std::fs::write(&config, r#"{"locale": "en", "log_level": "error"}"#).unwrap();
    let db = tmp.path().join("daycal.sqlite3");

    Command::new(assert_cmd::cargo::cargo_bin!("daycal"))
        .arg("--config")
        .arg(&config)
        .arg("--db")
        .arg(&db)
        .args(["day", "2024-10-18"])
        .assert()
        .success()
        .stdout(predicate::str::contains("October 18 (2024-10-18)"));
}

#[test]
fn unknown_config_field_fails() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("daycal.json");
    std::fs::write(&config, r#"{"theme": "dark"}"#).unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("daycal"))
        .arg("--config")
        .arg(&config)
        .arg("month")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn offsets_past_the_date_range_are_rejected() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("daycal.sqlite3");

    daycal(&db)
        .args(["day", "2024-01-01", "--offset", "2147483647"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: --offset 2147483647"));

    daycal(&db)
        .args([
            "agenda",
            "--start",
            "9999-12-31",
            "--days",
            "366",
            "--offset",
            "300000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the supported calendar range"));
}

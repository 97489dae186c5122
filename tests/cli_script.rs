use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn billkeep_in(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("billkeep_cli").unwrap();
    cmd.env("BILLKEEP_CLI_SCRIPT", "1")
        .env("BILLKEEP_HOME", home)
        .env("BILLKEEP_UPLOAD_DELAY_MS", "0");
    cmd
}

#[test]
fn script_mode_adds_a_bill_and_persists_it() {
    let temp = tempdir().unwrap();
    let input = "bill add Water 38.20 2030-07-01 Utilities\nledger save\nexit\n";

    billkeep_in(temp.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Water has been added to your bills"));

    let json = std::fs::read_to_string(temp.path().join("ledger.json")).unwrap();
    assert!(json.contains("\"Water\""));
    assert!(json.contains("\"2030-07-01\""));
}

#[test]
fn paying_a_sample_bill_reports_success() {
    let temp = tempdir().unwrap();
    billkeep_in(temp.path())
        .write_stdin("bill pay 1\nbill pay 1\nexit\n")
        .assert()
        .success()
        .stdout(contains("Electricity has been marked as paid."))
        .stdout(contains("Electricity is already paid."));
}

#[test]
fn deleting_a_bill_skips_confirmation_in_script_mode() {
    let temp = tempdir().unwrap();
    billkeep_in(temp.path())
        .write_stdin("bill delete 2\nbill delete 2\nexit\n")
        .assert()
        .success()
        .stdout(contains("Rent has been removed from your bills."))
        .stdout(contains("No bill with id 2."));
}

#[test]
fn simulated_upload_registers_a_document() {
    let temp = tempdir().unwrap();
    billkeep_in(temp.path())
        .write_stdin("document upload June_2023_Bill.pdf 1\ndocument list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Your file has been uploaded successfully"))
        .stdout(contains("June_2023_Bill.pdf"));

    let json = std::fs::read_to_string(temp.path().join("ledger.json")).unwrap();
    assert!(json.contains("June_2023_Bill.pdf"));
}

#[test]
fn rejected_uploads_surface_the_error_branch() {
    let temp = tempdir().unwrap();
    billkeep_in(temp.path())
        .write_stdin("document upload notes.txt\nexit\n")
        .assert()
        .success()
        .stdout(contains("unsupported file type `txt`"));
}

#[test]
fn past_reminder_dates_are_rejected_inline() {
    let temp = tempdir().unwrap();
    billkeep_in(temp.path())
        .write_stdin("reminder add Dentist 2001-01-01\nexit\n")
        .assert()
        .success()
        .stdout(contains("Reminder date cannot be in the past"));
}

#[test]
fn duplicate_categories_are_rejected_case_insensitively() {
    let temp = tempdir().unwrap();
    billkeep_in(temp.path())
        .write_stdin("category add utilities\nexit\n")
        .assert()
        .success()
        .stdout(contains("already exists"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let temp = tempdir().unwrap();
    billkeep_in(temp.path())
        .write_stdin("bil list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `bil`"))
        .stdout(contains("Suggestion: `bill`?"));
}

#[test]
fn dashboard_tabs_render() {
    let temp = tempdir().unwrap();
    billkeep_in(temp.path())
        .write_stdin("dashboard\ndashboard bills\ndashboard budget\nexit\n")
        .assert()
        .success()
        .stdout(contains("Household Bill Manager"))
        .stdout(contains("Budget Usage : 94%"));
}

#[test]
fn mutations_persist_across_runs() {
    let temp = tempdir().unwrap();
    billkeep_in(temp.path())
        .write_stdin("bill add Daycare 300.00 2030-09-01 Other\nexit\n")
        .assert()
        .success();

    billkeep_in(temp.path())
        .write_stdin("bill list Daycare\nexit\n")
        .assert()
        .success()
        .stdout(contains("Daycare"));
}

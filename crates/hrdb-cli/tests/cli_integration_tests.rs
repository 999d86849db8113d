//! CLI integration tests
//!
//! Each test drives the compiled binary against a database file in a
//! temporary directory.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn setup_db(temp_dir: &TempDir) -> PathBuf {
    let db_path = temp_dir.path().join("company.db");
    let output = run_cli(temp_dir.path(), &db_path, &["init"]);
    assert_success(&output);
    db_path
}

fn run_cli(dir: &Path, db_path: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_hrdb-cli");
    Command::new(cli_bin)
        .current_dir(dir)
        .env_remove("HRDB_DATABASE")
        .env_remove("HRDB_WAL")
        .env_remove("HRDB_FOREIGN_KEYS")
        .env_remove("HRDB_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .args(args)
        .args(["--db", db_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn seed_company(dir: &Path, db_path: &Path) {
    assert_success(&run_cli(
        dir,
        db_path,
        &["department", "add", "--name", "Sales", "--location", "NY"],
    ));
    assert_success(&run_cli(
        dir,
        db_path,
        &[
            "employee",
            "add",
            "--name",
            "John Doe",
            "--job-title",
            "Salesperson",
            "--department-id",
            "1",
        ],
    ));
}

#[test]
fn test_cli_init_creates_tables() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_db(&temp_dir);

    let conn = Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
             AND name IN ('departments', 'employees', 'reviews')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn test_cli_review_scenario() {
    // Given: A department and an employee
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_db(&temp_dir);
    seed_company(temp_dir.path(), &db_path);

    // When: Two reviews are added
    let first = run_cli(
        temp_dir.path(),
        &db_path,
        &[
            "review",
            "add",
            "--year",
            "2023",
            "--summary",
            "Excellent performance",
            "--employee-id",
            "1",
        ],
    );
    assert_success(&first);
    assert_eq!(stdout(&first).trim(), "1\t2023\t1\tExcellent performance");

    let second = run_cli(
        temp_dir.path(),
        &db_path,
        &[
            "review",
            "add",
            "--year",
            "2024",
            "--summary",
            "Outstanding achievement",
            "--employee-id",
            "1",
        ],
    );
    assert_success(&second);

    // Then: The employee's reviews come back in creation order as JSON
    let output = run_cli(
        temp_dir.path(),
        &db_path,
        &["employee", "reviews", "1", "--json"],
    );
    assert_success(&output);
    let reviews: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        reviews,
        serde_json::json!([
            {"id": 1, "year": 2023, "summary": "Excellent performance", "employee_id": 1},
            {"id": 2, "year": 2024, "summary": "Outstanding achievement", "employee_id": 1}
        ])
    );
}

#[test]
fn test_cli_rejects_invalid_year() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_db(&temp_dir);
    seed_company(temp_dir.path(), &db_path);

    let output = run_cli(
        temp_dir.path(),
        &db_path,
        &[
            "review",
            "add",
            "--year",
            "1999",
            "--summary",
            "Too early",
            "--employee-id",
            "1",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("year must be an integer that is greater than or equal to 2000"));

    let conn = Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_cli_rejects_unknown_employee() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_db(&temp_dir);

    let output = run_cli(
        temp_dir.path(),
        &db_path,
        &[
            "review",
            "add",
            "--year",
            "2023",
            "--summary",
            "Nobody",
            "--employee-id",
            "7",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_INVALID_INPUT"));
    assert!(stderr.contains("employee_id must be the id of an Employee instance"));
}

#[test]
fn test_cli_update_and_delete_review() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_db(&temp_dir);
    seed_company(temp_dir.path(), &db_path);
    assert_success(&run_cli(
        temp_dir.path(),
        &db_path,
        &[
            "review",
            "add",
            "--year",
            "2023",
            "--summary",
            "Good",
            "--employee-id",
            "1",
        ],
    ));

    let updated = run_cli(
        temp_dir.path(),
        &db_path,
        &["review", "update", "1", "--year", "2025", "--summary", "Great"],
    );
    assert_success(&updated);
    assert_eq!(stdout(&updated).trim(), "1\t2025\t1\tGreat");

    let deleted = run_cli(temp_dir.path(), &db_path, &["review", "delete", "1"]);
    assert_success(&deleted);
    assert_eq!(stdout(&deleted).trim(), "deleted review 1");

    let missing = run_cli(temp_dir.path(), &db_path, &["review", "delete", "1"]);
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_cli_reset_clears_rows() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = setup_db(&temp_dir);
    seed_company(temp_dir.path(), &db_path);

    assert_success(&run_cli(temp_dir.path(), &db_path, &["reset"]));

    let output = run_cli(temp_dir.path(), &db_path, &["department", "list"]);
    assert_success(&output);
    assert!(stdout(&output).trim().is_empty());
}

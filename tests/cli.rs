use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn accounter(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("accounter").unwrap();
    cmd.env("ACCOUNTER_DATA_DIR", data_dir.path())
        .env("ACCOUNTER_LOG", "off");
    cmd
}

fn add(data_dir: &TempDir, args: &[&str]) {
    accounter(data_dir).arg("add").args(args).assert().success();
}

#[test]
fn test_add_then_list() {
    let data_dir = TempDir::new().unwrap();

    accounter(&data_dir)
        .args(["add", "expense", "food", "12.50", "--date", "2024-03-01", "--desc", "lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID:       1"))
        .stdout(predicate::str::contains("¥12.50"));

    add(&data_dir, &["income", "salary", "5000", "--date", "2024-03-05"]);

    accounter(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("lunch"))
        .stdout(predicate::str::contains("+¥5000.00"))
        .stdout(predicate::str::contains("2 transactions"));

    accounter(&data_dir)
        .args(["list", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lunch").not());

    let stored = fs::read_to_string(data_dir.path().join("data").join("accounters.json")).unwrap();
    assert!(stored.contains("\"transaction_id\": 1"));
    assert!(stored.contains("\"amount\": 1250"));
}

#[test]
fn test_pagination() {
    let data_dir = TempDir::new().unwrap();
    for amount in ["1", "2", "3", "4", "5"] {
        add(&data_dir, &["expense", "food", amount, "--date", "2024-01-01"]);
    }

    accounter(&data_dir)
        .args(["list", "--page", "3", "--page-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 3 of 3 (5 transactions)"));
}

#[test]
fn test_stats() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, &["income", "salary", "100", "--date", "2024-03-01"]);
    add(&data_dir, &["expense", "food", "40", "--date", "2024-03-02"]);

    accounter(&data_dir)
        .args(["stats", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("工资"))
        .stdout(predicate::str::contains("餐饮"))
        .stdout(predicate::str::contains("¥60.00"));

    accounter(&data_dir)
        .args(["stats", "periods", "monthly", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03"));

    accounter(&data_dir)
        .args(["stats", "periods", "weekly", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"period_name\": \"2024 week 9\""));
}

#[test]
fn test_edit_show_delete() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, &["expense", "transport", "3", "--date", "2024-03-01"]);

    accounter(&data_dir)
        .args(["edit", "1", "--amount", "4.20", "--desc", "bus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("¥4.20"));

    accounter(&data_dir)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Description: bus"));

    accounter(&data_dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    accounter(&data_dir)
        .args(["delete", "1", "--force"])
        .assert()
        .success();

    accounter(&data_dir)
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found: 1"));
}

#[test]
fn test_validation_errors() {
    let data_dir = TempDir::new().unwrap();

    accounter(&data_dir)
        .args(["add", "expense", "food", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be negative"));

    accounter(&data_dir)
        .args(["add", "expense", "food", "5", "--date", "2024/03/01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));

    accounter(&data_dir)
        .args(["list", "--from", "2024-03-10", "--to", "2024-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("after end date"));

    accounter(&data_dir)
        .args(["add", "expense", "nonsense", "5"])
        .assert()
        .failure();
}

#[test]
fn test_malformed_data_file() {
    let data_dir = TempDir::new().unwrap();
    let data = data_dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("accounters.json"), "{ broken").unwrap();

    accounter(&data_dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to access transaction data"))
        .stderr(predicate::str::contains("accounters.json").not());
}

#[test]
fn test_export_csv() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, &["expense", "food", "12.50", "--date", "2024-03-01", "--desc", "lunch"]);

    let output = data_dir.path().join("out.csv");
    accounter(&data_dir)
        .args(["export", "csv", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transactions"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("ID,Date,Type,Category"));
    assert!(csv.contains("1,2024-03-01,expense,餐饮,0,12.50,lunch"));
}

#[test]
fn test_export_error_hides_path() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, &["expense", "food", "1", "--date", "2024-03-01"]);

    let output = data_dir.path().join("missing-dir").join("out.csv");
    accounter(&data_dir)
        .args(["export", "csv", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create output file"))
        .stderr(predicate::str::contains("missing-dir").not());
}

#[test]
fn test_init_and_categories() {
    let data_dir = TempDir::new().unwrap();

    accounter(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));
    assert!(data_dir.path().join("config.json").exists());
    assert!(data_dir.path().join("data").join("accounters.json").exists());

    accounter(&data_dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("other-income"))
        .stdout(predicate::str::contains("人情往来"));

    accounter(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:       true"));
}

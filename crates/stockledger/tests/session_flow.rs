use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stock"))
}

fn run_session(dir: &Path, stock_file: &Path, extra_args: &[&str], script: &str) -> Output {
    let mut child = Command::new(bin())
        .current_dir(dir)
        .arg("--config")
        .arg(dir.join("absent.toml"))
        .arg("--file")
        .arg(stock_file)
        .args(extra_args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn stock");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("write script");

    child.wait_with_output().expect("wait for stock")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn first_run_creates_stock_file_and_saves_on_quit() {
    let dir = tempdir().unwrap();
    let stock = dir.path().join("stock.txt");

    let output = run_session(dir.path(), &stock, &[], "1\nA1\nRice\n10\n500\n4\n6\n");

    assert!(output.status.success());
    let out = stdout_of(&output);
    assert!(out.contains("Created initial stock file"));
    assert!(out.contains("5000.00FrCFA"));
    assert!(out.contains("Goodbye!"));
    assert!(out.contains("Saved to"));

    let contents = fs::read_to_string(&stock).unwrap();
    assert_eq!(
        contents,
        "# Stock file\n# Format: ID| Name| Quantity| Price\nA1| Rice| 10| 500.00\n"
    );
}

#[test]
fn records_survive_between_sessions() {
    let dir = tempdir().unwrap();
    let stock = dir.path().join("stock.txt");

    let first = run_session(
        dir.path(),
        &stock,
        &[],
        "1\nA1\nRice\n10\n500\n1\nB2\nRed beans\n4\n2.25\n6\n",
    );
    assert!(first.status.success());

    let second = run_session(dir.path(), &stock, &[], "3\nA1\n5\nbeans\n6\n");
    assert!(second.status.success());
    let out = stdout_of(&second);
    assert!(out.contains("Product deleted successfully!"));
    assert!(out.contains("B2"));

    let contents = fs::read_to_string(&stock).unwrap();
    assert!(!contents.contains("A1|"));
    assert!(contents.contains("B2| Red beans| 4| 2.25"));
}

#[test]
fn malformed_lines_are_skipped_and_dropped_on_save() {
    let dir = tempdir().unwrap();
    let stock = dir.path().join("stock.txt");
    fs::write(
        &stock,
        "# hand edited\nA1| Rice| 10| 500.00\ngarbage line\n\nB2| Beans| x| 1.00\n",
    )
    .unwrap();

    let output = run_session(dir.path(), &stock, &[], "6\n");

    assert!(output.status.success());
    let contents = fs::read_to_string(&stock).unwrap();
    assert_eq!(
        contents,
        "# Stock file\n# Format: ID| Name| Quantity| Price\nA1| Rice| 10| 500.00\n"
    );
}

#[test]
fn capacity_flag_limits_additions() {
    let dir = tempdir().unwrap();
    let stock = dir.path().join("stock.txt");

    let output = run_session(
        dir.path(),
        &stock,
        &["--capacity", "1"],
        "1\nA1\nRice\n10\n500\n1\n6\n",
    );

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Stock is full! Cannot add a product."));
}

#[test]
fn closed_stdin_still_saves() {
    let dir = tempdir().unwrap();
    let stock = dir.path().join("stock.txt");

    let output = run_session(dir.path(), &stock, &[], "1\nA1\nRice\n10\n500\n");

    assert!(output.status.success());
    let contents = fs::read_to_string(&stock).unwrap();
    assert!(contents.contains("A1| Rice| 10| 500.00"));
}

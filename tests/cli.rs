use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const FIXTURE: &str = "tests/data/test_data.txt";

fn cmd() -> Command {
    Command::cargo_bin("knut-check").unwrap()
}

#[test]
fn lists_raw_entries_without_fields() {
    cmd()
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(contains("Name=Knut"))
        .stdout(contains("Ports=[7171, 7172, 7173]"));
}

#[test]
fn prints_typed_values_for_declared_fields() {
    cmd()
        .args([FIXTURE, "--field", "Name:string", "--field", "Ports:[u16]"])
        .args(["-f", "Number:int", "-f", "IsTrue:bool", "-f", "F32:f32", "-f", "F64:f64"])
        .args(["-f", "ValInt8:i8", "-f", "ValInt16:i16", "-f", "ValInt32:i32"])
        .args(["-f", "ValInt64:i64", "-f", "Uint8Value:u8", "-f", "Greeting:text"])
        .args(["-f", "Names:[string]"])
        .assert()
        .success()
        .stdout(contains("Name = \"Knut\""))
        .stdout(contains("Number = 532"))
        .stdout(contains("Ports = [7171, 7172, 7173]"));
}

#[test]
fn undeclared_key_fails() {
    cmd()
        .args([FIXTURE, "--field", "Name:string"])
        .assert()
        .failure()
        .stderr(contains("unknown field 'Number'"));
}

#[test]
fn malformed_line_fails() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.conf");
    fs::write(&path, "Name=Knut\njusttext\n").expect("write config");

    cmd()
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("line 2: invalid line: justtext"));
}

#[test]
fn bad_field_spec_fails() {
    cmd()
        .args([FIXTURE, "--field", "Name"])
        .assert()
        .failure()
        .stderr(contains("expected NAME:KIND"));
}

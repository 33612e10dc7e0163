use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("boolcalc").unwrap()
}

/// This test asserts what is part of the CLI and the documentation for it.
///
/// As changes are made, this help text will need updating, which helps
/// highlight any changes to the public interface.
#[test]
fn test_help_text() {
    let stdout = String::from_utf8(
        cmd()
            .arg("--help")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone(),
    )
    .unwrap();

    assert_eq!(
        stdout,
        "\
An interactive console for boolean algebra over named variables

Usage: boolcalc [FILE]

Arguments:
  [FILE]  Path to a script of statements to run instead of reading stdin

Options:
  -h, --help     Print help
  -V, --version  Print version
"
    );
}

/// Statements piped through stdin are processed in order, and the banner is
/// suppressed for non-interactive input.
#[test]
fn test_stdin_session() {
    cmd()
        .write_stdin("x := 1 | 0\ncall display(x)\n")
        .assert()
        .success()
        .stdout(predicate::eq("x := 1\nx := 1\n"))
        .stderr(predicate::eq(""));
}

/// An engine error aborts only its own line.
#[test]
fn test_errors_do_not_stop_the_session() {
    cmd()
        .write_stdin("y := z\nx := 1\n")
        .assert()
        .success()
        .stdout(predicate::eq(
            "Error: usage of undefined parameter or variable 'z'\nx := 1\n",
        ));
}

/// A literal `exit` line ends the session early.
#[test]
fn test_exit_stops_the_session() {
    cmd()
        .write_stdin("x := 1\nexit\ncall display(x)\n")
        .assert()
        .success()
        .stdout(predicate::eq("x := 1\n"));
}

/// Statements are read from a script file when one is given.
#[test]
fn test_file_input() {
    let mut file = tempfile::Builder::new()
        .prefix("boolcalc")
        .suffix(".bc")
        .tempfile()
        .unwrap();
    writeln!(file, "and2(a, b) := a & b").unwrap();
    writeln!(file, "call compare(and2, and2)").unwrap();

    cmd()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq(
            "and2(a, b) := (a & b)\nVariables 'and2' and 'and2' are equal.\n",
        ));
}

/// An unreadable input file exits with code 2.
#[test]
fn test_unreadable_file() {
    cmd()
        .arg("this/path/does/not/exist.bc")
        .assert()
        .failure()
        .code(predicate::eq(2))
        .stdout(predicate::eq(""))
        .stderr(predicate::str::starts_with(
            "cannot open file 'this/path/does/not/exist.bc':",
        ));
}

/// Surplus positional arguments exit with code 1.
#[test]
fn test_wrong_argument_count() {
    cmd()
        .args(["one.bc", "two.bc"])
        .assert()
        .failure()
        .code(predicate::eq(1))
        .stderr(predicate::str::contains("unexpected argument"));
}

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const ENGLISH: &str = "\
% scenario A
s --> np, vp
np --> det, n
det --> [the]
n --> [man]
n --> [dog]
vp --> tv, np
tv --> [hit]
";

const ANBN: &str = "s --> [a], s, [b]\ns --> [a], [b]\n";

fn grammar_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn cfgtrace() -> Command {
    let mut cmd = cargo_bin_cmd!("cfgtrace");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn parse_accepts_with_table_output() {
    let grammar = grammar_file(ENGLISH);
    cfgtrace()
        .args(["parse", "--algorithm", "bottom-up", "--grammar"])
        .arg(grammar.path())
        .args(["The", "man", "hit", "the", "dog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shift"))
        .stdout(predicate::str::contains("np --> det, n"))
        .stdout(predicate::str::contains("accepted in"));
}

#[test]
fn parse_rejects_with_exit_code_one() {
    let grammar = grammar_file(ANBN);
    cfgtrace()
        .args(["parse", "-a", "top-down", "-g"])
        .arg(grammar.path())
        .arg("a b")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("reject"));
}

#[test]
fn parse_json_output() {
    let grammar = grammar_file(ANBN);
    let output = cfgtrace()
        .args(["parse", "-a", "top-down-backtracking", "--format", "json", "-g"])
        .arg(grammar.path())
        .args(["a", "a", "b", "b"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], true);
    let steps = value["steps"].as_array().unwrap();
    assert_eq!(steps.last().unwrap()["action"], "accept");
    assert_eq!(steps.last().unwrap()["input_index"], 4);
}

#[test]
fn parse_limit_error_exits_with_two() {
    let grammar = grammar_file("s --> s, [a]\ns --> [a]\n");
    cfgtrace()
        .args(["parse", "-a", "top-down", "--max-steps", "50", "-g"])
        .arg(grammar.path())
        .arg("a a")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("step limit of 50 exceeded"));
}

#[test]
fn zero_limit_is_rejected() {
    let grammar = grammar_file(ANBN);
    cfgtrace()
        .args(["parse", "-a", "bottom-up-backtracking", "--max-depth", "0", "-g"])
        .arg(grammar.path())
        .arg("a b")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid parser configuration"));
}

#[test]
fn unknown_algorithm_is_a_usage_error() {
    let grammar = grammar_file(ANBN);
    cfgtrace()
        .args(["parse", "-a", "earley", "-g"])
        .arg(grammar.path())
        .arg("a b")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Algorithm not supported"));
}

#[test]
fn missing_grammar_file() {
    cfgtrace()
        .args(["parse", "-a", "top-down", "-g", "no/such/grammar.txt", "a"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read no/such/grammar.txt"));
}

#[test]
fn malformed_grammar_reports_line() {
    let grammar = grammar_file("s --> [a]\nt -> [b]\n");
    cfgtrace()
        .args(["check", "-g"])
        .arg(grammar.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn request_from_stdin() {
    let body = serde_json::json!({
        "sentence": "the man hit the dog",
        "grammar": ENGLISH,
        "algorithm": "bottom-up-backtracking",
    });
    let output = cfgtrace().arg("request").write_stdin(body.to_string()).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["steps"].as_array().unwrap().last().unwrap()["stack"], serde_json::json!(["s"]));
}

#[test]
fn request_from_file_with_unknown_algorithm() {
    let body = serde_json::json!({
        "sentence": "a b",
        "grammar": ANBN,
        "algorithm": "cyk",
    });
    let file = grammar_file(&body.to_string());
    cfgtrace()
        .arg("request")
        .arg(file.path())
        .assert()
        .code(2)
        .stdout(predicate::str::diff("{\"error\":\"Algorithm not supported: \\\"cyk\\\"\"}\n"));
}

#[test]
fn check_prints_warnings() {
    let grammar = grammar_file("s --> s, [a]\ns --> [a]\n");
    cfgtrace()
        .args(["check", "-g"])
        .arg(grammar.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rules, start symbol `s`"))
        .stdout(predicate::str::contains("warning: `s` is left-recursive"))
        .stderr(predicate::str::contains("left-recursive"));
}

#[test]
fn check_clean_grammar() {
    let grammar = grammar_file(ENGLISH);
    cfgtrace()
        .args(["check", "-g"])
        .arg(grammar.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with("ok\n"));
}

#[test]
fn compare_runs_every_algorithm() {
    let grammar = grammar_file(ANBN);
    let output = cfgtrace()
        .args(["compare", "-g"])
        .arg(grammar.path())
        .args(["a", "b"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let verdicts: Vec<(&str, &str)> = stdout
        .lines()
        .map(|line| {
            let mut words = line.split_whitespace();
            (words.next().unwrap(), words.next().unwrap())
        })
        .collect();
    assert_eq!(
        verdicts,
        [
            ("top-down", "reject"),
            ("bottom-up", "accept"),
            ("top-down-backtracking", "accept"),
            ("bottom-up-backtracking", "accept"),
        ]
    );
}

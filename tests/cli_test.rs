//! End-to-end tests for the famtree binary

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

use famtree::exitcode;

const SAMPLE: &str = "tests/resources/sample_family_tree.txt";

/// Run the binary with an empty config file so user settings don't leak in.
fn famtree(args: &[&str]) -> Output {
    let temp = TempDir::new().unwrap();
    let config: PathBuf = temp.path().join("famtree.toml");
    std::fs::write(&config, "").unwrap();

    Command::new(env!("CARGO_BIN_EXE_famtree"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("FAMTREE_FILE")
        .env_remove("FAMTREE_INPUT_FILE")
        .output()
        .expect("run famtree")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn given_sample_when_running_most_grandchildren_then_prints_jill() {
    let output = famtree(&["-f", SAMPLE, "most-grandchildren"]);

    assert_eq!(output.status.code(), Some(exitcode::OK));
    let printed = stdout(&output);
    assert!(printed.lines().any(|l| l == "Jill"), "{printed}");
}

#[test]
fn given_sample_when_counting_siblings_then_prints_number() {
    let output = famtree(&["-f", SAMPLE, "siblings", "--count", "George"]);

    assert_eq!(output.status.code(), Some(exitcode::OK));
    assert_eq!(stdout(&output).trim(), "3");
}

#[test]
fn given_unknown_member_when_querying_then_usage_exit_code() {
    let output = famtree(&["-f", SAMPLE, "grandparents", "Ghost"]);

    assert_eq!(output.status.code(), Some(exitcode::USAGE));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Ghost"));
}

#[test]
fn given_missing_file_when_running_then_noinput_exit_code() {
    let output = famtree(&["-f", "does/not/exist.txt", "members"]);
    assert_eq!(output.status.code(), Some(exitcode::NOINPUT));
}

#[test]
fn given_malformed_file_when_running_then_dataerr_exit_code() {
    let output = famtree(&["-f", "tests/resources/unknown_record.txt", "members"]);
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
}

#[test]
fn given_no_input_file_when_running_then_usage_exit_code() {
    let output = famtree(&["members"]);
    assert_eq!(output.status.code(), Some(exitcode::USAGE));
}

#[test]
fn given_menu_on_closed_stdin_when_running_then_exits_cleanly() {
    // Command::output() gives the child an empty stdin, so the menu sees EOF
    let output = famtree(&["-f", SAMPLE, "menu"]);

    assert_eq!(output.status.code(), Some(exitcode::OK));
    assert!(stdout(&output).contains("Selection: "));
}

#[test]
fn given_config_template_without_input_file_when_running_then_prints_template() {
    let output = famtree(&["config", "template"]);

    assert_eq!(output.status.code(), Some(exitcode::OK));
    assert!(stdout(&output).contains("self_links"));
}

#[test]
fn given_children_query_when_running_then_lists_in_declaration_order() {
    let output = famtree(&["-f", SAMPLE, "children", "Kevin"]);

    assert_eq!(output.status.code(), Some(exitcode::OK));
    let printed = stdout(&output);
    let children: Vec<&str> = printed.lines().collect();
    assert_eq!(children, vec!["Samuel", "George", "James", "Aaron"]);
}

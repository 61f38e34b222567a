//! Integration tests for CLI commands.
//!
//! Demo output is compared literally, line for line.

#![allow(deprecated)] // Command::cargo_bin is deprecated but replacement requires newer assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pipewise(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pipewise").unwrap();
    cmd.current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path())
        .env_remove("RUST_LOG");
    cmd
}

fn assert_demo(name: &str, expected: &str) {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["demo", name])
        .assert()
        .success()
        .stdout(expected.to_string());
}

// ============================================================================
// Demos
// ============================================================================

#[test]
fn lambda_demos_print_expected_lines() {
    assert_demo("consumer", "One, Two and Three\nSix, Nine and Ten\n");
    assert_demo(
        "bifunction",
        "The product of 5 and 10 is 50\nThe product of 3 and 5 is 15\n",
    );
    assert_demo("executor", "Result of fn(1, 2) is 3\nResult of fn(1, 2) is 2\n");
    assert_demo("generator", "1 + 2 = 3\n1 * 2 = 2\n");
    assert_demo("optional", "Some String: I'm here!\nsomeAbsentString present? No\n");
}

#[test]
fn stream_demos_print_expected_lines() {
    assert_demo("map", "[5, 10, 15, 20, 25]\n");
    assert_demo(
        "flat-map",
        "[[John's Home, John's Office], [Mary's Home]]\n[John's Home, John's Office, Mary's Home]\n",
    );
    assert_demo("filter", "[1, 3, 5]\n");
    assert_demo("skip", "[4, 5]\n");
    assert_demo("limit", "[1, 2, 3]\n");
    assert_demo("distinct", "[1, 2, 3, 5]\n");
    assert_demo("sort", "[Sean (33), John (26), Mary (25)]\n");
    assert_demo("reduce", "65\n[1, 2, 3, 4, 5]\n");
    assert_demo(
        "reduce-optional",
        "Step 1. Reduce list to store it in optional.\ntrue\na, a, b\na,a,b\n",
    );
    assert_demo(
        "reverse-words",
        "Original String: Welcome to java's Stream and Lambda\n\
         Reversed String: emocleW ot s'avaj maertS dna adbmaL \n",
    );
}

#[test]
fn demos_run_in_requested_order() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["demo", "skip", "limit"])
        .assert()
        .success()
        .stdout("[4, 5]\n[1, 2, 3]\n");
}

#[test]
fn all_demos_run_without_names() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("One, Two and Three\n"))
        .stdout(predicate::str::ends_with("adbmaL \n"));
}

#[test]
fn unknown_demo_fails_before_running_any() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["--no-color", "demo", "map", "nope"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("unknown demo 'nope'"));
}

#[test]
fn reduce_demo_is_unchanged_in_parallel_mode() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("pipewise.toml"),
        "[execution]\nmode = \"parallel\"\nparallel_threshold = 1\n",
    )
    .unwrap();

    pipewise(&temp)
        .args(["demo", "reduce"])
        .assert()
        .success()
        .stdout("65\n[1, 2, 3, 4, 5]\n");
}

#[test]
fn list_shows_every_demo() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["--no-color", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reduce-optional"))
        .stdout(predicate::str::contains("reverse-words"))
        .stdout(predicate::str::contains("Description"));
}

// ============================================================================
// Eval
// ============================================================================

#[test]
fn eval_sequence() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["eval", "-s", "filter:odd", "-s", "map:mul:5", "1", "2", "3", "4", "5"])
        .assert()
        .success()
        .stdout("[5, 15, 25]\n");
}

#[test]
fn eval_seeded_sum() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["eval", "-s", "reduce:sum:50", "1", "2", "3", "4", "5"])
        .assert()
        .success()
        .stdout("65\n");
}

#[test]
fn eval_parallel_seeded_sum() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("pipewise.toml"),
        "[execution]\nparallel_threshold = 1\n",
    )
    .unwrap();

    pipewise(&temp)
        .args(["eval", "--parallel", "-s", "reduce:sum:50", "1", "2", "3", "4", "5"])
        .assert()
        .success()
        .stdout("65\n");
}

#[test]
fn eval_rejects_oversized_repeat() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["eval", "-s", "flat_map:repeat:100000000000000", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"));
}

#[test]
fn eval_rejects_seed_on_min() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["eval", "-s", "reduce:min:5", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument '5'"));
}

#[test]
fn eval_parallel_flag_ignores_threshold() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["-v", "eval", "--parallel", "-s", "reduce:sum:50", "1", "2", "3"])
        .assert()
        .success()
        .stdout("56\n")
        .stderr(predicate::str::contains("partitioned fold"));
}

#[test]
fn eval_empty_reduction() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["eval", "-s", "filter:gt:10", "-s", "reduce:max", "1", "2"])
        .assert()
        .success()
        .stdout("<empty>\n");
}

#[test]
fn eval_join_keeps_separator() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["eval", "-s", "sort", "-s", "join:, ", "3", "1", "2"])
        .assert()
        .success()
        .stdout("1, 2, 3\n");
}

#[test]
fn eval_json_output() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["eval", "--json", "-s", "distinct", "1", "1", "2", "3", "5"])
        .assert()
        .success()
        .stdout("{\"kind\":\"sequence\",\"value\":[1,2,3,5]}\n");
}

#[test]
fn eval_json_from_config() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pipewise.toml"), "[output]\njson = true\n").unwrap();

    pipewise(&temp)
        .args(["eval", "-s", "count", "1", "2", "3"])
        .assert()
        .success()
        .stdout("{\"kind\":\"count\",\"value\":3}\n");
}

#[test]
fn eval_explain_prints_plan() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["--no-color", "eval", "--explain", "-s", "skip:1", "-s", "count", "1", "2"])
        .assert()
        .success()
        .stdout("  plan: skip:1 => count\n1\n");
}

#[test]
fn eval_overflow_is_an_error() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["--no-color", "eval", "-s", "map:square", "9223372036854775807"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("integer overflow"));
}

#[test]
fn eval_division_by_zero_is_an_error() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["--no-color", "eval", "-s", "map:div:0", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("division by zero"));
}

// ============================================================================
// Reverse & Config
// ============================================================================

#[test]
fn reverse_text() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["reverse", "hello world"])
        .assert()
        .success()
        .stdout("olleh dlrow \n");
}

#[test]
fn reverse_keeps_double_spaces() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .args(["reverse", "ab  cd"])
        .assert()
        .success()
        .stdout("ba  dc \n");
}

#[test]
fn config_shows_defaults() {
    let temp = TempDir::new().unwrap();
    pipewise(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[execution]"))
        .stdout(predicate::str::contains("mode = \"sequential\""))
        .stdout(predicate::str::contains("level = \"warn\""));
}

#[test]
fn config_reflects_local_overrides() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pipewise.toml"), "[logging]\nlevel = \"info\"\n").unwrap();
    fs::write(
        temp.path().join("pipewise.local.toml"),
        "[logging]\nlevel = \"error\"\n",
    )
    .unwrap();

    pipewise(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("level = \"error\""))
        .stdout(predicate::str::contains("# project: "))
        .stdout(predicate::str::contains("# local: "))
        .stdout(predicate::str::contains("pipewise.local.toml"));
}

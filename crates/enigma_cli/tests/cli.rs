//! Binary-level checks: exit codes, error text, and both output formats.
//!
//! Successful runs narrow the pools to rotors 1,2,3 and reflector B so each
//! search stays at 105,456 keys.

use assert_cmd::Command;
use predicates::prelude::*;

const CIPHERTEXT: &str =
    "ZTQBLVXKPBPGAVQBRYDYQEZNKRLMZTMRGBJSQKHDPHHNTNIDLYVFCOKZYYSMJFAHQBTEAVFKOXRPSQX";
const PLAINTEXT: &str =
    "THISISASLIGHTLYLONGERTESTSOIHAVETOSEEIFICANKEEPWRITINGALONGERSTRINGTOUSEASINPUT";

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("enigma-crack").expect("binary builds");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_message_exits_with_validation_code() {
    bin()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no message given"));
}

#[test]
fn unknown_rotor_is_rejected() {
    bin()
        .args(["--message", "ABC", "--rotors", "1,2,9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rotor \"9\" does not exist"));
}

#[test]
fn unknown_reflector_is_rejected() {
    bin()
        .args(["--message", "ABC", "--reflectors", "A,X"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("reflector \"X\" does not exist"));
}

#[test]
fn too_few_rotors_is_rejected() {
    bin()
        .args(["--message", "ABC", "--rotors", "1,2,2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least 3 distinct rotors"));
}

#[test]
fn lowercase_message_is_rejected() {
    bin()
        .args(["--message", "hello"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("only A-Z is supported"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    bin().args(["--message", "ABC", "--plugboard", "AB"]).assert().code(2);
}

#[test]
fn help_lists_the_search_flags() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--num-threads")
                .and(predicate::str::contains("--crib"))
                .and(predicate::str::contains("--reflectors")),
        );
}

#[test]
fn text_output_shows_the_best_key() {
    bin()
        .args([
            "--message", CIPHERTEXT,
            "--rotors", "1,2,3",
            "--reflectors", "B",
            "--results", "2",
            "--num_threads", "2",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with(
                "SETTINGS:\nKEY: AAB\nROTORS: Rotor 1, 1930, Rotor 2, 1930, Rotor 3, 1930\nREFLECTOR: Reflector B\n\nFREQUENCY SCORE (smaller is better): ",
            )
            .and(predicate::str::contains(format!("MESSAGE:\n{PLAINTEXT}\n")))
            .and(predicate::str::contains("==============================").count(2)),
        );
}

#[test]
fn crib_is_accepted() {
    bin()
        .args([
            "--message", CIPHERTEXT,
            "--crib", "LONGERTEST",
            "--rotors", "1,2,3",
            "--reflectors", "B",
            "--results", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("KEY: AAB").and(predicate::str::contains(PLAINTEXT)));
}

#[test]
fn json_output_ranks_results() {
    bin()
        .args([
            "--message", CIPHERTEXT,
            "--rotors", "1,2,3",
            "--reflectors", "B",
            "--results", "1",
            "--format", "json",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"evaluated\": 105456")
                .and(predicate::str::contains("\"timed_out\": false"))
                .and(predicate::str::contains("\"rank\": 1"))
                .and(predicate::str::contains(format!("\"plaintext\": \"{PLAINTEXT}\"")))
                .and(predicate::str::contains("\"key\": \"AAB\""))
                .and(predicate::str::contains("\"reflector\": \"B\"")),
        );
}

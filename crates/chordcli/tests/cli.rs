//! End-to-end tests for the `chord` binary
//!
//! Every invocation points `--config` at a file in a temp dir so a
//! `chordcraft.toml` in the working directory cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn chord(dir: &TempDir, config_body: &str) -> Command {
    let config = dir.path().join("chordcraft.toml");
    fs::write(&config, config_body).unwrap();

    let mut cmd = Command::cargo_bin("chord").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("CHORDCRAFT_PROFILE")
        .env_remove("CHORDCRAFT_LIMIT")
        .env_remove("CHORDCRAFT_USE_SPICE")
        .arg("--no-color")
        .arg("--config")
        .arg(&config);
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("--json").output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn lists_diatonic_chords() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .args(["chords", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dm"))
        .stdout(predicate::str::contains("vii°"))
        .stdout(predicate::str::contains("Bdim"));
}

#[test]
fn seventh_chords_as_json() {
    let dir = TempDir::new().unwrap();
    let json = json_output(chord(&dir, "").args(["chords", "F", "--sevenths"]));
    let symbols: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(
        symbols,
        ["Fmaj7", "Gm7", "Am7", "Bbmaj7", "C7", "Dm7", "Em7b5"]
    );
}

#[test]
fn describes_a_key() {
    let dir = TempDir::new().unwrap();
    let json = json_output(chord(&dir, "").args(["key", "Bb dorian"]));
    assert_eq!(json["mode"], "dorian");
    assert_eq!(json["family"], "minor");
    assert_eq!(json["relative_major"], "Ab");
    assert_eq!(json["scale"][2], "Db");
}

#[test]
fn reports_chord_degree() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .args(["degree", "F#dim7", "--key", "C major"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#iv°7"));
}

#[test]
fn bad_key_fails_with_hint() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .args(["degree", "C", "--key", "nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonsense"))
        .stderr(predicate::str::contains("F# dorian"));
}

#[test]
fn substitutions_for_dominant() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .args(["subs", "G7", "--key", "C", "--next", "Cmaj7", "--sevenths"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Db7"))
        .stdout(predicate::str::contains("Bb7"));
}

#[test]
fn substitution_weights_come_from_config() {
    let dir = TempDir::new().unwrap();
    let json = json_output(
        chord(&dir, "[scoring]\ntritone = 9.0\n")
            .args(["subs", "G7", "--key", "C", "--next", "Cmaj7", "--sevenths"]),
    );
    assert_eq!(json[0]["substitute_symbol"], "Db7");
    assert_eq!(json[0]["score"], 13.0);
}

#[test]
fn non_diatonic_target_is_an_error() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .args(["subs", "F#7", "--key", "C"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("F#7"));
}

#[test]
fn suggests_resolution_after_two_five() {
    let dir = TempDir::new().unwrap();
    let json = json_output(chord(&dir, "").args(["suggest", "--key", "C", "Dm", "G"]));
    assert_eq!(json[0]["roman"], "I");
    assert_eq!(json[0]["symbol"], "C");
}

#[test]
fn suggestion_profile_and_limit_from_config() {
    let dir = TempDir::new().unwrap();
    let json = json_output(
        chord(&dir, "[suggestions]\nprofile = \"seventh\"\nlimit = 1\n")
            .args(["suggest", "--key", "C", "Dm7", "G7"]),
    );
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["symbol"], "Cmaj7");
}

#[test]
fn bad_profile_in_config_fails() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "[suggestions]\nprofile = \"bebop\"\n")
        .args(["suggest", "--key", "C", "Dm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bebop"));
}

#[test]
fn filters_progressions() {
    let dir = TempDir::new().unwrap();
    let json = json_output(chord(&dir, "").args([
        "progressions",
        "--family",
        "major",
        "--tag",
        "jazz",
        "--type",
        "seventh",
    ]));
    assert_eq!(json[0]["id"], "jazz-ii-v-i");
}

#[test]
fn transposes_progressions() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .args(["progressions", "--family", "major", "--tonic", "G"])
        .assert()
        .success()
        .stdout(predicate::str::contains("G D Em C"));
}

#[test]
fn matches_numeral_runs() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .args(["match", "--family", "major", "I", "V", "vi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pop-axis"));
}

#[test]
fn match_needs_numerals() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .args(["match", "--family", "major"])
        .assert()
        .failure();
}

#[test]
fn votes_for_next_numeral() {
    let dir = TempDir::new().unwrap();
    let json = json_output(chord(&dir, "").args(["next", "--tonic", "C", "ii", "V"]));
    assert_eq!(json[0]["roman"], "I");
    assert_eq!(json[0]["chord"], "C");
}

#[test]
fn opening_chords_for_minor() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .args(["start", "--family", "minor", "--tonic", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Am"));
}

#[test]
fn lists_tags() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "")
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("jazz"))
        .stdout(predicate::str::contains("gospel"));
}

#[test]
fn shows_effective_config() {
    let dir = TempDir::new().unwrap();
    chord(&dir, "[scoring]\nbackdoor = 2.5\n")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("backdoor = 2.5"))
        .stdout(predicate::str::contains("# file:"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("chord")
        .unwrap()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("tags")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn generates_completions() {
    Command::cargo_bin("chord")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chord"));
}

use assert_cmd::cargo::{self};
use predicates::str::contains;
use tempfile::tempdir;

const STORED: &str = r#"{
  "character": {
    "name": "Luke Skywalker",
    "height": "172",
    "birth_year": "19BBY",
    "homeworld": "Tatooine",
    "url": "https://swapi.dev/api/people/1/"
  },
  "nickname": "Farmboy",
  "favorite": true,
  "savedAt": "2024-05-04T12:00:00Z",
  "selectedUrl": "https://swapi.dev/api/people/1/"
}"#;

#[test]
fn print_emits_the_stored_ficha() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join("ficha-galactica.json"), STORED).expect("seed");

    let mut cmd = cargo::cargo_bin_cmd!("fichaui");
    cmd.arg("--print")
        .arg("--store-dir")
        .arg(dir.path())
        .arg("--no-pretty")
        .assert()
        .success()
        .stdout(contains("\"nickname\":\"Farmboy\""))
        .stdout(contains("\"savedAt\""));
    assert!(dir.path().join("fichaui.log").exists());
}

#[test]
fn print_without_a_stored_ficha_fails() {
    let dir = tempdir().expect("tempdir");
    let mut cmd = cargo::cargo_bin_cmd!("fichaui");
    cmd.arg("--print")
        .arg("--store-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("no ficha stored"));
}

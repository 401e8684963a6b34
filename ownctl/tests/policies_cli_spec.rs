use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn given_policies_command_then_lists_default_first() {
    let mut cmd = Command::cargo_bin("ownctl").unwrap();
    cmd.arg("policies");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("assign-creator"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("drop"));
}

#[test]
fn given_policies_json_then_array_of_entries() {
    let mut cmd = Command::cargo_bin("ownctl").unwrap();
    cmd.args(["policies", "--json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let entries = v.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "assign-creator");
    assert_eq!(entries[0]["default"], true);
    assert_eq!(entries[1]["displayName"], "Do not assign ownership");
}

#[test]
fn given_version_command_then_prints_crate_version() {
    let mut cmd = Command::cargo_bin("ownctl").unwrap();
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

use assert_cmd::Command;
use predicates::prelude::*;

fn bake() -> Command {
    let mut cmd = Command::cargo_bin("bake").unwrap();
    // CI の環境変数がテストへ漏れないように素の環境で起動する
    cmd.env_clear();
    cmd
}

#[test]
fn help_lists_subcommands() {
    bake()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("capture"))
        .stdout(predicate::str::contains("replicate"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn version_prints_crate_version() {
    bake()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn provision_fails_fast_without_configuration() {
    bake()
        .arg("provision")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NHN_AUTH_URL"));
}

#[test]
fn capture_fails_fast_without_token() {
    bake()
        .arg("capture")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOKEN"));
}

#[test]
fn replicate_requires_a_source_endpoint() {
    bake()
        .arg("replicate")
        .env("TOKEN", "tok")
        .env("SOURCE_IMAGE_ID", "abc-123")
        .env("SOURCE_IMAGE_NAME", "app-image")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SOURCE_IMAGE_BASE_URL"));
}

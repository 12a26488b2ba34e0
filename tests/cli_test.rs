use assert_cmd::Command;
use predicates::prelude::*;

fn auragen(temp_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("auragen").unwrap();
    cmd.env("AURAGEN_DATA_DIR", temp_dir.path())
        .env_remove("GEMINI_API_KEY");
    cmd
}

#[test]
fn studio_commands_require_a_session() {
    let temp_dir = tempfile::tempdir().unwrap();

    auragen(&temp_dir)
        .args(["gallery", "list"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Not logged in"));
}

#[test]
fn login_unlocks_the_gallery() {
    let temp_dir = tempfile::tempdir().unwrap();

    auragen(&temp_dir)
        .arg("login")
        .assert()
        .success()
        .stdout(predicates::str::contains("Session active"));

    auragen(&temp_dir)
        .args(["gallery", "list"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Vault is empty."));
}

#[test]
fn logout_closes_the_session() {
    let temp_dir = tempfile::tempdir().unwrap();

    auragen(&temp_dir).arg("login").assert().success();
    auragen(&temp_dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicates::str::contains("Session closed"));

    auragen(&temp_dir)
        .args(["gallery", "list"])
        .assert()
        .failure();
}

#[test]
fn presets_list_shows_builtins_and_customs() {
    let temp_dir = tempfile::tempdir().unwrap();
    auragen(&temp_dir).arg("login").assert().success();

    auragen(&temp_dir)
        .args(["presets", "list"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Anime").and(predicates::str::contains("Cyberpunk")));

    auragen(&temp_dir)
        .args(["presets", "add", "Moody", "film noir, deep shadows"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Custom style archived."));

    auragen(&temp_dir)
        .args(["presets", "list"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Moody"));

    auragen(&temp_dir)
        .args(["presets", "remove", "Moody"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Style removed."));
}

#[test]
fn builtin_presets_cannot_be_removed() {
    let temp_dir = tempfile::tempdir().unwrap();
    auragen(&temp_dir).arg("login").assert().success();

    auragen(&temp_dir)
        .args(["presets", "remove", "Anime"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Built-in styles cannot be removed"));
}

#[test]
fn key_management_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();

    auragen(&temp_dir)
        .args(["key", "status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No API key"));

    auragen(&temp_dir)
        .args(["key", "set", "test-key-123"])
        .assert()
        .success()
        .stdout(predicates::str::contains("API key stored."));

    auragen(&temp_dir)
        .args(["key", "status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("API key configured."));

    auragen(&temp_dir)
        .args(["key", "clear"])
        .assert()
        .success()
        .stdout(predicates::str::contains("API key cleared."));
}

#[test]
fn reset_clears_session_and_key() {
    let temp_dir = tempfile::tempdir().unwrap();

    auragen(&temp_dir).arg("login").assert().success();
    auragen(&temp_dir)
        .args(["key", "set", "test-key-123"])
        .assert()
        .success();

    auragen(&temp_dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Factory reset complete"));

    auragen(&temp_dir)
        .args(["key", "status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No API key"));
    auragen(&temp_dir)
        .args(["gallery", "list"])
        .assert()
        .failure();
}

#[test]
fn generate_without_a_key_fails_cleanly() {
    let temp_dir = tempfile::tempdir().unwrap();
    auragen(&temp_dir).arg("login").assert().success();

    auragen(&temp_dir)
        .args(["generate", "a quiet harbor at dusk"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("No API key configured"));
}

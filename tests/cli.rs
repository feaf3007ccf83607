use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn keyshow_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("keyshow").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn keyshow_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    keyshow_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "On-screen keystroke overlay for Wayland compositors",
        ))
        .stdout(predicate::str::contains("--events"));
}

#[test]
fn overlay_requires_wayland_env() {
    let temp = TempDir::new().unwrap();
    keyshow_cmd(&temp)
        .env_remove("WAYLAND_DISPLAY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("WAYLAND_DISPLAY not set"))
        .stderr(predicate::str::contains("Wayland environment required"));
}

#[test]
fn print_config_shows_defaults() {
    let temp = TempDir::new().unwrap();
    keyshow_cmd(&temp)
        .env_remove("WAYLAND_DISPLAY")
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[animation]"))
        .stdout(predicate::str::contains("appear_ms = 100"))
        .stdout(predicate::str::contains("percent_from_bottom = 0.2"))
        .stdout(predicate::str::contains("keyboard_interactivity = \"none\""));
}

#[test]
fn print_config_reports_clamped_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");
    std::fs::write(
        &path,
        "[performance]\ntarget_fps = 1000\n\n[animation]\nfade_ms = 250\n",
    )
    .unwrap();

    keyshow_cmd(&temp)
        .arg("--config")
        .arg(&path)
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("target_fps = 240"))
        .stdout(predicate::str::contains("fade_ms = 250"));
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "[animation\nappear_ms = ").unwrap();

    keyshow_cmd(&temp)
        .env("RUST_LOG", "warn")
        .arg("--config")
        .arg(&path)
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("appear_ms = 100"))
        .stderr(predicate::str::contains("Using defaults"));
}

#[test]
fn init_config_writes_file_once() {
    let temp = TempDir::new().unwrap();
    let expected = temp.path().join("keyshow").join("config.toml");

    keyshow_cmd(&temp)
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default configuration"));

    let written = std::fs::read_to_string(&expected).unwrap();
    assert!(written.contains("[style]"));
    assert!(written.contains("font_family = \"Sans\""));

    keyshow_cmd(&temp)
        .arg("--init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn print_and_init_are_exclusive() {
    let temp = TempDir::new().unwrap();
    keyshow_cmd(&temp)
        .args(["--print-config", "--init-config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn schema_binary_describes_config() {
    Command::cargo_bin("keyshow-config-schema")
        .expect("schema binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"animation\""))
        .stdout(predicate::str::contains("fade_delay_ms"));
}

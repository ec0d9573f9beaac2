use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn paintpad_cmd() -> Command {
    Command::cargo_bin("paintpad").expect("binary exists")
}

fn write_script(dir: &std::path::Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("script.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn paintpad_help_prints_usage() {
    paintpad_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Free-hand raster drawing canvas with brush, eraser and text tools",
        ));
}

#[test]
fn replay_requires_script_argument() {
    paintpad_cmd()
        .arg("replay")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn info_prints_version() {
    paintpad_cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn replay_writes_painting_to_output_dir() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out");
    let script = write_script(
        temp.path(),
        r#"{
            "viewport_width": 375,
            "steps": [
                { "action": "set_brush_color", "color": "red" },
                { "action": "pointer_down", "event": { "source": "mouse", "client_x": 20, "client_y": 20 } },
                { "action": "pointer_move", "event": { "source": "mouse", "client_x": 200, "client_y": 300 } },
                { "action": "pointer_up" },
                { "action": "save" }
            ]
        }"#,
    );

    paintpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("replay")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let saved = output.join("my-painting.png");
    assert!(saved.exists());
    let image = image::open(&saved).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (340, 520));
    assert_eq!(image.get_pixel(20, 20).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(330, 10).0, [255, 255, 255, 255]);
}

#[test]
fn replay_viewport_flag_overrides_script() {
    let temp = TempDir::new().unwrap();
    let script = write_script(
        temp.path(),
        r#"{ "viewport_width": 375, "steps": [{ "action": "save" }] }"#,
    );

    paintpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("replay")
        .arg(&script)
        .args(["--viewport", "1280", "--output"])
        .arg(temp.path())
        .assert()
        .success();

    let image = image::open(temp.path().join("my-painting.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(image.dimensions(), (1000, 500));
}

#[test]
fn replay_rejects_malformed_script() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), r#"{ "steps": [{ "action": "fly" }] }"#);

    paintpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid script"));
}

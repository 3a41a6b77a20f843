//! End-to-end tests of the kinect-viewer binary.

mod common;

use std::process::{Command, Output};

use common::{fixtures, TestWorkspace};
use pretty_assertions::assert_eq;

fn run(ws: &TestWorkspace, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kinect-viewer"))
        .arg("--config")
        .arg(&ws.config_path)
        .args(args)
        .env_remove("CONFIG_FILE")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run kinect-viewer")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_cli_render_with_stats() {
    let ws = TestWorkspace::new();
    let input = ws.write_raw("frame.raw", &fixtures::gradient_samples());
    let out = ws.output_dir();

    let output = run(
        &ws,
        &[
            "render",
            "--input",
            input.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
            "--cloud",
            "--stats",
        ],
    );
    let text = stdout(&output);

    assert!(out.join("depth.png").exists());
    assert!(out.join("color_rainbow.png").exists());
    assert!(out.join("cloud.pcd").exists());

    let json_start = text.find('{').expect("Expected JSON stats");
    let stats: serde_json::Value = serde_json::from_str(&text[json_start..]).unwrap();
    assert_eq!(stats["width"], fixtures::WIDTH);
    assert_eq!(stats["color_mode"], "rainbow");
}

#[test]
fn test_cli_render_unknown_mode_fails() {
    let ws = TestWorkspace::new();
    let input = ws.write_raw("frame.raw", &fixtures::gradient_samples());
    let out = ws.output_dir();

    let output = run(
        &ws,
        &[
            "render",
            "--input",
            input.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
            "--mode",
            "sepia",
        ],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("sepia"));
}

#[test]
fn test_cli_measure() {
    let ws = TestWorkspace::new();
    let input = ws.write_raw("frame.raw", &fixtures::gradient_samples());

    let text = stdout(&run(
        &ws,
        &["measure", "--input", input.to_str().unwrap(), "-x", "4", "-y", "3"],
    ));
    assert!(text.starts_with("(4, 3): "), "{text}");
    assert!(text.trim_end().ends_with(" m"), "{text}");
}

#[test]
fn test_cli_wrong_frame_size_fails() {
    let ws = TestWorkspace::new();
    let input = ws.write_raw("short.raw", &[500; 10]);

    let output = run(&ws, &["measure", "--input", input.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected 384 bytes"));
}

#[test]
fn test_cli_palette() {
    let ws = TestWorkspace::new();
    let path = ws.path().join("palette.png");

    stdout(&run(&ws, &["palette", "--output", path.to_str().unwrap()]));

    common::assert_png(&path, 256, 64, png::ColorType::Rgb);
}

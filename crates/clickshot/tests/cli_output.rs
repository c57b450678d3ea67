//! Integration tests for clickshot CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::{GrayImage, Luma, Rgba, RgbaImage};

const CONFIG: &str = r#"
[paths]
images_dir = "images"

[[regions]]
name = "page_properties"
window = "Page Properties"

[[regions.elements]]
name = "ok_button"
expected_rect = [40, 30, 24, 12]

[[regions]]
name = "popup"
app = "Firefox"
"#;

fn textured(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        Luma([((x * 37 + y * 91 + (x * y) % 13) % 256) as u8])
    })
}

/// Write a config, the ok_button reference, and two screenshots: one showing
/// the button where expected and one without it
fn fixture() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("clickshot.toml");
    std::fs::write(&config, CONFIG).unwrap();

    let reference = textured(24, 12);
    let images = dir.path().join("images").join("page_properties");
    std::fs::create_dir_all(&images).unwrap();
    reference.save(images.join("ok_button.png")).unwrap();

    let blank = RgbaImage::from_pixel(120, 80, Rgba([30, 30, 30, 255]));
    blank.save(dir.path().join("without_button.png")).unwrap();

    let mut with_button = blank;
    for (x, y, pixel) in reference.enumerate_pixels() {
        let v = pixel[0];
        with_button.put_pixel(40 + x, 30 + y, Rgba([v, v, v, 255]));
    }
    with_button.save(dir.path().join("with_button.png")).unwrap();

    (dir, config)
}

fn clickshot(config: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_clickshot"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute 'clickshot'")
}

/// Execute 'clickshot regions' and verify it succeeds
fn run_regions(config: &Path, extra: &[&str]) -> std::process::Output {
    let mut args = extra.to_vec();
    args.push("regions");
    let output = clickshot(config, &args);

    assert!(
        output.status.success(),
        "clickshot regions failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    output
}

// =============================================================================
// Default Mode (Quiet) Behavioral Tests
// =============================================================================

/// Verify that default mode (no flags) suppresses all log levels
#[test]
fn test_default_mode_suppresses_all_logs() {
    let (_dir, config) = fixture();
    let output = run_regions(&config, &[]);

    let stderr = String::from_utf8_lossy(&output.stderr);

    for level in &["INFO", "DEBUG", "WARN", "ERROR", "TRACE"] {
        let pattern = format!(r#""level":"{}""#, level);
        assert!(
            !stderr.contains(&pattern),
            "Default mode should suppress {} logs, but stderr contains: {}",
            level,
            stderr
        );
    }
}

/// Verify that stdout contains only user-facing output (no JSON logs)
#[test]
fn test_stdout_is_clean() {
    let (_dir, config) = fixture();
    let output = run_regions(&config, &["-v"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(stdout.contains("page_properties"));
    assert!(stdout.contains("ok_button"));
}

// =============================================================================
// Verbose Mode Behavioral Tests
// =============================================================================

/// Verify verbose mode (-v) emits INFO logs
#[test]
fn test_verbose_flag_emits_info_logs() {
    let (_dir, config) = fixture();
    let output = run_regions(&config, &["-v"]);

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains(r#""level":"INFO""#),
        "Verbose mode should emit INFO logs, but stderr is: {}",
        stderr
    );
    assert!(stderr.contains("core.app.startup_completed"));
}

/// Verify verbose mode works with --verbose long form
#[test]
fn test_verbose_flag_long_form_emits_logs() {
    let (_dir, config) = fixture();
    let output = run_regions(&config, &["--verbose"]);

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains(r#""level":"INFO""#),
        "--verbose long form should emit INFO logs, but stderr is: {}",
        stderr
    );
}

// =============================================================================
// Command Behavior
// =============================================================================

#[test]
fn test_regions_json_lists_elements() {
    let (_dir, config) = fixture();
    let output = clickshot(&config, &["regions", "--json"]);
    assert!(output.status.success());

    let regions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let regions = regions.as_array().unwrap();

    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0]["name"], "page_properties");
    assert_eq!(
        regions[0]["elements"]["ok_button"]["expected_rect"],
        serde_json::json!([40, 30, 24, 12])
    );
    assert_eq!(regions[1]["name"], "popup");
}

#[test]
fn test_check_passes_against_matching_screenshot() {
    let (dir, config) = fixture();
    let screenshot = dir.path().join("with_button.png");
    let output = clickshot(
        &config,
        &[
            "check",
            "page_properties.ok_button",
            "--json",
            "--from-image",
            screenshot.to_str().unwrap(),
        ],
    );

    assert!(
        output.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["passed"], true);
    assert_eq!(result["details"]["rect"], serde_json::json!([40, 30, 24, 12]));
}

#[test]
fn test_check_exits_with_failure_when_not_visible() {
    let (dir, config) = fixture();
    let screenshot = dir.path().join("without_button.png");
    let output = clickshot(
        &config,
        &[
            "check",
            "page_properties.ok_button",
            "--from-image",
            screenshot.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Assertion: FAIL"), "stdout: {}", stdout);
}

#[test]
fn test_unknown_element_is_reported() {
    let (dir, config) = fixture();
    let screenshot = dir.path().join("with_button.png");
    let output = clickshot(
        &config,
        &[
            "check",
            "page_properties.cancel_button",
            "--from-image",
            screenshot.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cancel_button"), "stderr: {}", stderr);
    assert!(stderr.contains("Available: ok_button"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("clickshot.toml");
    std::fs::write(&config, "[matching]\nthreshold = 1.5\n").unwrap();

    let output = clickshot(&config, &["regions"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"), "stderr: {}", stderr);
}

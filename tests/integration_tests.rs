use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use similar::TextDiff;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn expected(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/expected")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read expected output {}: {}", path.display(), e))
}

/// Runs the binary with an empty config directory so a user's own
/// settings file never leaks into the results.
fn modelgen(args: &[&str]) -> Output {
    let home = TempDir::new().expect("Failed to create temp dir");
    Command::new(env!("CARGO_BIN_EXE_modelgen"))
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute modelgen")
}

fn stdout_of(output: Output, what: &str) -> String {
    if !output.status.success() {
        panic!(
            "modelgen failed on {}: {}",
            what,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8(output.stdout).expect("modelgen output is not valid UTF-8")
}

fn assert_same(what: &str, expected: &str, actual: &str) {
    if expected != actual {
        let diff = TextDiff::from_lines(expected, actual);
        panic!(
            "Output mismatch for {}:\n{}",
            what,
            diff.unified_diff().header("expected", "actual")
        );
    }
}

/// Renders `fixture_name` and compares the output with `expected_name`.
fn test_fixture(fixture_name: &str, expected_name: &str, extra: &[&str]) {
    let path = fixture(fixture_name);
    assert!(path.exists(), "JSON fixture not found: {}", path.display());

    let path = path.to_string_lossy().into_owned();
    let mut args = vec![path.as_str()];
    args.extend_from_slice(extra);
    let actual = stdout_of(modelgen(&args), fixture_name);
    assert_same(fixture_name, &expected(expected_name), &actual);
}

#[test]
fn test_java_file_fixture() {
    test_fixture("widget.json", "widget.java", &[]);
}

#[test]
fn test_markup_document_fixture() {
    test_fixture("pom.json", "pom.xml", &["--target", "markup"]);
}

#[test]
fn test_crlf_terminates_every_line() {
    let expected = expected("widget.java").replace('\n', "\r\n");
    let path = fixture("widget.json");
    let actual = stdout_of(
        modelgen(&[path.to_str().unwrap(), "--crlf"]),
        "widget.json --crlf",
    );
    assert_same("widget.json --crlf", &expected, &actual);
}

#[test]
fn test_indent_override() {
    let path = fixture("widget.json");
    let actual = stdout_of(
        modelgen(&[path.to_str().unwrap(), "--indent", "2"]),
        "widget.json --indent 2",
    );
    assert!(actual.contains("\n  private final long id;\n"));
    assert!(actual.contains("\n    this.id = id;\n"));
    assert!(!actual.contains("    private"));
}

#[test]
fn test_settings_file_extends_ignores() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");
    fs::write(&settings, "indent = 4\nignore_packages = [\"java.util\"]\n").unwrap();

    let path = fixture("widget.json");
    let actual = stdout_of(
        modelgen(&[
            path.to_str().unwrap(),
            "--config",
            settings.to_str().unwrap(),
        ]),
        "widget.json with settings",
    );

    assert!(!actual.contains("import java.util.Set;"));
    assert!(!actual.contains("import java.util.Collections;"));
    assert!(actual.contains("import static java.util.Objects.requireNonNull;"));
    assert!(actual.contains("    private Set<String> labels = Collections.emptySet();"));
}

#[test]
fn test_invalid_model_is_rejected() {
    let path = fixture("invalid_name.json");
    let output = modelgen(&[path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid model"), "stderr: {}", stderr);
    assert!(stderr.contains("2Broken"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_model_for_the_wrong_target_is_rejected() {
    let path = fixture("pom.json");
    let output = modelgen(&[path.to_str().unwrap(), "--target", "java"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_settings_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    let path = fixture("widget.json");
    let output = modelgen(&[
        path.to_str().unwrap(),
        "--config",
        missing.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load settings"));
}

#[test]
fn test_unknown_target_is_rejected() {
    let path = fixture("widget.json");
    let output = modelgen(&[path.to_str().unwrap(), "--target", "cobol"]);
    assert!(!output.status.success());
}

#[test]
fn test_all_fixtures_exist() {
    for name in ["widget.json", "pom.json", "invalid_name.json"] {
        assert!(fixture(name).exists(), "Missing fixture: {}", name);
    }
    for name in ["widget.java", "pom.xml"] {
        assert!(!expected(name).is_empty(), "Empty expected output: {}", name);
    }
}

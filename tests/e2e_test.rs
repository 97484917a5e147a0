/// End-to-end tests for the CLI
use std::fs;
use tempfile::TempDir;

// Exit code tests for CLI
mod exit_code_tests {
    use assert_cmd::cargo::cargo_bin_cmd;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("depscout").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("depscout").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("depscout")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("depscout")
            .args(["-f", "invalid_format"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - non-existent target path
    #[test]
    fn test_exit_code_application_error_nonexistent_path() {
        cargo_bin_cmd!("depscout")
            .args(["-p", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(3);
    }

    /// Exit code 3: Application error - path is a file, not a directory
    #[test]
    fn test_exit_code_application_error_file_not_directory() {
        cargo_bin_cmd!("depscout")
            .args(["-p", "Cargo.toml"])
            .assert()
            .code(3);
    }
}

fn write_yarn_project(dir: &TempDir) {
    fs::write(
        dir.path().join("package.json"),
        r#"{
  "name": "web-app",
  "version": "1.0.0",
  "dependencies": { "left-pad": "^1.0.0" }
}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("yarn.lock"),
        "left-pad@^1.0.0:\n  version \"1.3.0\"\n",
    )
    .unwrap();
}

#[test]
fn test_e2e_yarn_project_json_report() {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    let dir = TempDir::new().unwrap();
    write_yarn_project(&dir);

    cargo_bin_cmd!("depscout")
        .args(["-p", dir.path().to_str().unwrap(), "-f", "json", "-e", "DPKG"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"exitCode\": 0"))
        .stdout(predicate::str::contains("npm:left-pad:1.3.0"))
        .stdout(predicate::str::contains("web-app"));
}

#[test]
fn test_e2e_yarn_project_text_report() {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    let dir = TempDir::new().unwrap();
    write_yarn_project(&dir);

    cargo_bin_cmd!("depscout")
        .args(["-p", dir.path().to_str().unwrap(), "-e", "DPKG"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("YARN"))
        .stdout(predicate::str::contains("Exit code: 0"));
}

/// A build script without its dependency report fails the extractable
/// gate and the run exits with 1.
#[test]
fn test_e2e_gradle_missing_report_exits_with_failure() {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("build.gradle"), "plugins { id 'java' }\n").unwrap();

    cargo_bin_cmd!("depscout")
        .args(["-p", dir.path().to_str().unwrap(), "-f", "json", "-e", "DPKG"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("DETECTABLE_NOT_EXTRACTABLE"));
}

#[test]
fn test_e2e_report_written_to_output_file() {
    use assert_cmd::cargo::cargo_bin_cmd;

    let dir = TempDir::new().unwrap();
    write_yarn_project(&dir);
    let output_path = dir.path().join("report.json");

    cargo_bin_cmd!("depscout")
        .args([
            "-p",
            dir.path().to_str().unwrap(),
            "-f",
            "json",
            "-e",
            "DPKG",
            "-o",
            output_path.to_str().unwrap(),
        ])
        .assert()
        .code(0);

    let report = fs::read_to_string(&output_path).unwrap();
    assert!(report.contains("npm:left-pad:1.3.0"));
}

#[test]
fn test_e2e_config_file_excludes_detectable() {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    let dir = TempDir::new().unwrap();
    // Only a build script: GRADLE would fail its extractable gate, but the
    // config file excludes it and the run succeeds.
    fs::write(dir.path().join("build.gradle"), "plugins { id 'java' }\n").unwrap();
    fs::write(
        dir.path().join("depscout.config.yml"),
        "exclude_detectables:\n  - GRADLE\n  - DPKG\n",
    )
    .unwrap();

    cargo_bin_cmd!("depscout")
        .args(["-p", dir.path().to_str().unwrap(), "-f", "json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"exitCode\": 0"));
}

#[test]
fn test_e2e_empty_directory_succeeds_with_no_locations() {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("depscout")
        .args(["-p", dir.path().to_str().unwrap(), "-e", "DPKG"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("No dependency graphs were extracted"));
}

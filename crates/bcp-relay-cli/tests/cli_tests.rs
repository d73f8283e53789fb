//! CLI integration tests for bcp-relay.
//!
//! These tests verify argument parsing, exit codes, and full runs against a
//! shell script that stands in for bcp.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Get a command for the bcp-relay binary.
fn cmd() -> Command {
    Command::cargo_bin("bcp-relay").unwrap()
}

/// Write a config file with integrated auth on both sides.
fn write_config(dir: &Path, tables: Option<&str>) -> PathBuf {
    let path = dir.join("bulk.ini");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[Database]").unwrap();
    writeln!(file, "database.source.instance = SRC\\PROD").unwrap();
    writeln!(file, "database.source.dbname = csd-tarfac").unwrap();
    writeln!(file, "database.source.windowsauth = True").unwrap();
    writeln!(file, "database.destination.instance = localhost").unwrap();
    writeln!(file, "database.destination.dbname = csd-tarfac").unwrap();
    writeln!(file, "database.destination.windowsauth = True").unwrap();
    if let Some(tables) = tables {
        writeln!(file, "[Bulk]").unwrap();
        writeln!(file, "bulk.tables = {}", tables).unwrap();
    }
    path
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--tables"))
        .stdout(predicate::str::contains("--confirm-yes"))
        .stdout(predicate::str::contains("--bcp-path"))
        .stdout(predicate::str::contains("--output-json"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bcp-relay"));
}

#[test]
fn test_defaults_in_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[default: bcp]"))
        .stdout(predicate::str::contains("[default: text]"))
        .stdout(predicate::str::contains("[default: warn]"));
}

#[test]
fn test_tables_flag_requires_a_value() {
    cmd()
        .args(["--confirm-yes", "--tables"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tables"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_missing_config_exits_with_code_7() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["--config", "nonexistent_config_file.ini", "-y"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Unknown file"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_key_exits_with_code_1() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.ini");
    std::fs::write(&path, "[Database]\ndatabase.source.instance = a\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-c", path.to_str().unwrap(), "-t", "A", "-y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("database.source.dbname"));
}

#[test]
fn test_no_tables_exits_with_code_1() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), None);

    cmd()
        .current_dir(dir.path())
        .args(["--config", config.to_str().unwrap(), "--confirm-yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Please specify tables in config file or using --tables CLI option",
        ));
    assert!(!dir.path().join("out").exists());
}

// =============================================================================
// Full Runs (fake bcp)
// =============================================================================

#[cfg(unix)]
mod runs {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// A bcp stand-in: records its arguments, writes the data file on
    /// export, fails for tables whose name starts with FAIL.
    const FAKE_BCP: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$BCP_RELAY_CALLS"
case "$1" in
  FAIL*)
    printf 'SQLState = S0002, NativeError = 208\\r\\nInvalid object name'
    exit 1
    ;;
esac
if [ "$2" = "out" ]; then
  printf '1\tone\n' > "$3"
fi
printf 'Starting copy...\\r\\n1 rows copied.\\r\\n'
"#;

    struct Sandbox {
        dir: tempfile::TempDir,
        bcp: PathBuf,
        calls: PathBuf,
    }

    impl Sandbox {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let bcp = dir.path().join("fake-bcp");
            std::fs::write(&bcp, FAKE_BCP).unwrap();
            std::fs::set_permissions(&bcp, std::fs::Permissions::from_mode(0o755)).unwrap();
            let calls = dir.path().join("calls.txt");
            Self { dir, bcp, calls }
        }

        fn cmd(&self) -> Command {
            let mut cmd = cmd();
            cmd.current_dir(self.dir.path())
                .env("BCP_RELAY_CALLS", &self.calls)
                .args(["--bcp-path", self.bcp.to_str().unwrap()]);
            cmd
        }

        fn calls(&self) -> Vec<String> {
            std::fs::read_to_string(&self.calls)
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }

        fn run_dirs(&self) -> Vec<PathBuf> {
            std::fs::read_dir(self.dir.path().join("out"))
                .unwrap()
                .map(|e| e.unwrap().path())
                .collect()
        }

        fn log_text(&self) -> String {
            let runs = self.run_dirs();
            assert_eq!(runs.len(), 1);
            let logs: Vec<PathBuf> = std::fs::read_dir(runs[0].join("logs"))
                .unwrap()
                .map(|e| e.unwrap().path())
                .collect();
            assert_eq!(logs.len(), 1);
            std::fs::read_to_string(&logs[0]).unwrap()
        }
    }

    #[test]
    fn test_cli_tables_replace_config_tables() {
        let sandbox = Sandbox::new();
        let config = write_config(sandbox.dir.path(), Some("A,B"));

        sandbox
            .cmd()
            .args(["--config", config.to_str().unwrap(), "--tables", "C", "--confirm-yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("TABLES: \n- C\n#"))
            .stdout(predicate::str::contains("Table [C] successfully copied!"))
            .stdout(predicate::str::contains("Would you like").not())
            .stdout(predicate::str::contains("Duration: 0 min"));

        let calls = sandbox.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("C out "));
        assert!(calls[1].starts_with("C in "));
        assert!(calls[1].contains(" -q -E -S localhost -d csd-tarfac -c -C 65001 -T"));
        assert!(calls[0].contains(" -S SRC\\PROD -d csd-tarfac -c -C 65001 -T"));
        assert!(calls.iter().all(|c| !c.contains("-U") && !c.contains("-P")));
    }

    #[test]
    fn test_failed_table_does_not_stop_batch() {
        let sandbox = Sandbox::new();
        let config = write_config(sandbox.dir.path(), Some("FAIL_A, B"));

        sandbox
            .cmd()
            .args(["-c", config.to_str().unwrap(), "-y"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[ERROR]:"))
            .stdout(predicate::str::contains("Table [FAIL_A] successfully copied!").not())
            .stdout(predicate::str::contains("Table [B] successfully copied!"))
            .stdout(predicate::str::contains("Failed tables: FAIL_A"));

        let calls = sandbox.calls();
        assert_eq!(calls.len(), 3);

        let log = sandbox.log_text();
        assert!(log.contains("[ERROR]: (bcp out, table [FAIL_A], exit code 1,"));
        assert!(log.contains("SQLState = S0002, NativeError = 208\r\nInvalid object name"));
        assert!(log.contains("Starting copy...\r\n1 rows copied.\r\n"));
    }

    #[test]
    fn test_work_dir_is_kept_and_data_files_removed() {
        let sandbox = Sandbox::new();
        let config = write_config(sandbox.dir.path(), Some("A"));

        sandbox
            .cmd()
            .args(["-c", config.to_str().unwrap(), "-y"])
            .assert()
            .success();

        let runs = sandbox.run_dirs();
        assert_eq!(runs.len(), 1);
        assert!(runs[0].join("logs").is_dir());
        assert!(!runs[0].join("A.txt").exists());
    }

    #[test]
    fn test_output_json_report() {
        let sandbox = Sandbox::new();
        let config = write_config(sandbox.dir.path(), Some("A"));

        sandbox
            .cmd()
            .args(["-c", config.to_str().unwrap(), "-y", "--output-json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"tables_total\": 1"))
            .stdout(predicate::str::contains("\"status\": \"copied\""));
    }

    #[test]
    fn test_closed_stdin_declines_confirmation() {
        let sandbox = Sandbox::new();
        let config = write_config(sandbox.dir.path(), Some("A"));

        sandbox
            .cmd()
            .args(["-c", config.to_str().unwrap()])
            .write_stdin("")
            .assert()
            .success()
            .stdout(predicate::str::contains("Importing data"));

        assert!(sandbox.calls().is_empty());
        assert!(!sandbox.dir.path().join("out").exists());
    }

    #[test]
    fn test_piped_yes_confirms() {
        let sandbox = Sandbox::new();
        let config = write_config(sandbox.dir.path(), Some("A"));

        sandbox
            .cmd()
            .args(["-c", config.to_str().unwrap()])
            .write_stdin("maybe\ny\n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Would you like to apply this bulk?"))
            .stdout(predicate::str::contains("Table [A] successfully copied!"));

        assert_eq!(sandbox.calls().len(), 2);
        assert!(sandbox.dir.path().join("out").is_dir());
    }

    #[test]
    fn test_piped_no_declines() {
        let sandbox = Sandbox::new();
        let config = write_config(sandbox.dir.path(), Some("A"));

        sandbox
            .cmd()
            .args(["-c", config.to_str().unwrap()])
            .write_stdin("n\n")
            .assert()
            .success();

        assert!(sandbox.calls().is_empty());
        assert!(!sandbox.dir.path().join("out").exists());
    }

    #[test]
    fn test_piped_blank_answers_use_connection_defaults() {
        let sandbox = Sandbox::new();

        sandbox
            .cmd()
            .args(["-t", "A", "-y"])
            .write_stdin("\n\n\n\n\n\n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("# SOURCE DB"))
            .stdout(predicate::str::contains("# DESTINATION DB"))
            .stdout(predicate::str::contains(
                "FROM: 153.89.154.109 (DB: csd-tarfac) (Windows authentication)",
            ));

        let calls = sandbox.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].contains(" -S 153.89.154.109 -d csd-tarfac -c -C 65001 -T"));
        assert!(calls[1].contains(" -S localhost -d csd-tarfac -c -C 65001 -T"));
    }

    #[test]
    fn test_piped_credentials_are_passed_to_bcp() {
        let sandbox = Sandbox::new();

        sandbox
            .cmd()
            .args(["-t", "A", "-y"])
            .write_stdin("SRV01\\SQL\nsales\nloader\ns3cret\n\n\n\n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("DB password:"))
            .stdout(predicate::str::contains("s3cret").not());

        let calls = sandbox.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].contains(" -S SRV01\\SQL -d sales -c -C 65001 -U loader -P s3cret"));
        assert!(calls[1].contains(" -S localhost -d csd-tarfac -c -C 65001 -T"));
    }

    #[test]
    fn test_missing_tool_reports_each_table() {
        let sandbox = Sandbox::new();
        let config = write_config(sandbox.dir.path(), Some("A, B"));

        cmd()
            .current_dir(sandbox.dir.path())
            .args([
                "-c",
                config.to_str().unwrap(),
                "-y",
                "--bcp-path",
                "bcp-relay-missing-tool",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("table [A], exit code none"))
            .stdout(predicate::str::contains("table [B], exit code none"));
    }
}

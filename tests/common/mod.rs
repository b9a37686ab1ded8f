//! Shared integration-test harness for running the `docs-sidebar` binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Runs `docs-sidebar` with `args` and waits for it to exit.
///
/// Loader limit and logging variables are cleared so the host
/// environment cannot change the outcome.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    spawn_command_with_env(args, &[])
}

/// Like [`spawn_command`] with extra environment variables set.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = command(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to spawn docs-sidebar")
}

/// Like [`spawn_command`] with `dir` as the working directory, so
/// relative paths in `args` resolve against it.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command_in(dir: &Path, args: &[&str]) -> Output {
    command(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn docs-sidebar")
}

fn command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docs-sidebar"));
    cmd.args(args)
        .env_remove("DOCS_SIDEBAR_LOG_LEVEL")
        .env_remove("DOCS_SIDEBAR_MAX_DEPTH")
        .env_remove("DOCS_SIDEBAR_MAX_NODES")
        .env_remove("DOCS_SIDEBAR_MAX_FILE_SIZE")
        .env_remove("DOCS_SIDEBAR_DOCS_DIR")
        .env_remove("DOCS_SIDEBAR_COLOR")
        .env_remove("DOCS_SIDEBAR_LOG_FORMAT")
        .env("NO_COLOR", "1");
    cmd
}

/// Returns the path to a test fixture.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Fixture path as a `&str`-friendly `String`.
#[must_use]
pub fn fixture(name: &str) -> String {
    fixture_path(name).display().to_string()
}

/// Captured stdout as UTF-8.
#[must_use]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr as UTF-8.
#[must_use]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

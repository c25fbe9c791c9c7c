//! Builder for running the `notegit` binary under `assert_cmd`.

// Shared by several test crates, each using a subset
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Arguments and environment for one `notegit` invocation.
///
/// `RUST_LOG` is always cleared so log output on stderr depends only on `-v`.
/// With [`NotegitCommand::config_home`], the config file is read from a test
/// directory instead of the user's.
pub struct NotegitCommand {
    args: Vec<String>,
    config_home: Option<PathBuf>,
}

impl NotegitCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config_home: None,
        }
    }

    /// Passes `--root <path>`.
    pub fn root(self, path: &Path) -> Self {
        let path = path.to_string_lossy().into_owned();
        self.args(["--root", path.as_str()])
    }

    /// Reads `notegit/config.toml` under `path` instead of the user's config.
    pub fn config_home(mut self, path: &Path) -> Self {
        self.config_home = Some(path.to_path_buf());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args.extend(args.into_iter().map(|s| s.as_ref().to_owned()));
        self
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the binary.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notegit").expect("notegit binary should be built");
        cmd.env_remove("RUST_LOG");
        if let Some(home) = &self.config_home {
            cmd.env("XDG_CONFIG_HOME", home).env("HOME", home);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the binary, asserts it succeeded and returns stdout.
    pub fn output_success(self) -> String {
        let stdout = self.assert().success().get_output().stdout.clone();
        String::from_utf8(stdout).expect("stdout should be UTF-8")
    }

    /// Like [`Self::output_success`], parsing stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let stdout = self.output_success();
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{stdout}"))
    }

    // ===========================================
    // Subcommands
    // ===========================================

    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    pub fn show(self, id: &str) -> Self {
        self.args(["show", id])
    }

    pub fn info(self) -> Self {
        self.args(["info"])
    }

    // ===========================================
    // Output formats
    // ===========================================

    pub fn format_json(self) -> Self {
        self.args(["-f", "json"])
    }

    pub fn format_paths(self) -> Self {
        self.args(["-f", "paths"])
    }
}

impl Default for NotegitCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        NotegitCommand::new().args(["--version"]).assert().success();
    }

    #[test]
    fn test_command_with_root() {
        let temp = TempDir::new().unwrap();
        let cmd = NotegitCommand::new().root(temp.path());
        let args = cmd.get_args();
        assert_eq!(args[0], "--root");
        assert_eq!(args[1], temp.path().to_string_lossy());
    }

    #[test]
    fn test_command_shortcuts_keep_order() {
        let cmd = NotegitCommand::new().ls().args(["--tn", "old"]).format_json();
        assert_eq!(cmd.get_args(), ["ls", "--tn", "old", "-f", "json"]);
    }
}

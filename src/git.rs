/// Git repository queries
///
/// This module handles:
/// - Running the git executable and capturing its trimmed stdout
/// - Getting the full commit hash of HEAD
/// - Getting the commit time of HEAD
/// - Checking for uncommitted or untracked changes

use crate::error::{QueryError, Result};
use chrono::{DateTime, Utc};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Environment variable git reads to locate an alternate index file
const INDEX_FILE_ENV: &str = "GIT_INDEX_FILE";

/// Capability to run git subcommands.
///
/// Implementations return stdout with trailing whitespace removed. When
/// `index_file` is set the subcommand must stage into that file instead of
/// the repository's own index.
pub trait GitRunner {
    fn run(&self, args: &[&str], index_file: Option<&Path>) -> Result<String>;
}

/// Runs the real git executable as a child process
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    work_dir: Option<PathBuf>,
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>, work_dir: Option<PathBuf>) -> Self {
        Self { program: program.into(), work_dir }
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut command = self.program.display().to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }
}

impl GitRunner for GitCli {
    fn run(&self, args: &[&str], index_file: Option<&Path>) -> Result<String> {
        let command = self.describe(args);
        debug!("Running {} in {:?} (index: {:?})", command, self.work_dir, index_file);

        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        if let Some(index) = index_file {
            cmd.env(INDEX_FILE_ENV, index);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd
            .output()
            .map_err(|source| QueryError::Spawn { program: self.program.display().to_string(), source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!("{} failed with {:?}", command, output.status.code());
            return Err(QueryError::Failed { command, code: output.status.code(), stderr });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| QueryError::NonUtf8Output { command: command.clone() })?;
        debug!("{} succeeded ({} bytes of output)", command, stdout.len());
        Ok(stdout.trim_end().to_string())
    }
}

/// Get the full commit hash of HEAD
///
/// Fails outside a repository and in a repository without commits.
pub fn head_commit_id(git: &impl GitRunner) -> Result<String> {
    git.run(&["rev-parse", "HEAD"], None)
}

/// Get the commit time of HEAD, in UTC
pub fn head_commit_timestamp(git: &impl GitRunner) -> Result<DateTime<Utc>> {
    let output = git.run(&["show", "--format=%ct", "--no-patch"], None)?;
    parse_commit_timestamp(&output)
}

/// Parse the `%ct` placeholder output (Unix epoch seconds)
pub fn parse_commit_timestamp(output: &str) -> Result<DateTime<Utc>> {
    let secs: i64 = output
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| QueryError::InvalidTimestamp {
            output: output.to_string(),
            reason: e.to_string(),
        })?;

    DateTime::from_timestamp(secs, 0).ok_or_else(|| QueryError::InvalidTimestamp {
        output: output.to_string(),
        reason: "out of range".to_string(),
    })
}

/// Check if the working tree is dirty (modified, staged, deleted or untracked files)
pub fn is_dirty(git: &impl GitRunner) -> Result<bool> {
    let status = git.run(&["status", "--porcelain"], None)?;
    Ok(!status.is_empty())
}

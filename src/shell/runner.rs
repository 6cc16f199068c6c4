//! Probe-level process invocation.
//!
//! A dependency probe is one child-process run: the only contract inspected
//! is the exit code and the first line of standard output. The resolver takes
//! a [`ProcessRunner`] rather than spawning directly so tests can script
//! probe outcomes without touching the system (see [`super::MockRunner`]).

use std::process::Command;

/// Why a process could not be started.
///
/// "Not found" is an expected, recoverable outcome (the resolver falls
/// through to the install-path scan); everything else is a classified fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnFailure {
    /// The executable does not exist on PATH.
    NotFound,
    /// The executable exists but cannot be run.
    PermissionDenied,
    /// Any other spawn error, with the OS message.
    Other(String),
}

impl std::fmt::Display for SpawnFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "executable not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

/// Captured output of a completed probe invocation.
#[derive(Debug, Clone, Default)]
pub struct ProbeOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl ProbeOutput {
    /// True when the process exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// First line of stdout, trimmed. Displayed as the version string,
    /// never parsed further.
    pub fn first_line(&self) -> &str {
        self.stdout.lines().next().unwrap_or("").trim()
    }
}

/// One child-process invocation with captured output.
pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until it exits.
    fn run(&self, program: &str, args: &[&str]) -> std::result::Result<ProbeOutput, SpawnFailure>;
}

/// [`ProcessRunner`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> std::result::Result<ProbeOutput, SpawnFailure> {
        let output = Command::new(program).args(args).output().map_err(|e| {
            match e.kind() {
                std::io::ErrorKind::NotFound => SpawnFailure::NotFound,
                std::io::ErrorKind::PermissionDenied => SpawnFailure::PermissionDenied,
                _ => SpawnFailure::Other(e.to_string()),
            }
        })?;

        Ok(ProbeOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

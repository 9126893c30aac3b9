//! Whole-program parity checks.
//!
//! Two programs each decode the same fixture and print what they derived from
//! it. Both must exit zero and their captured output must match byte for
//! byte. This catches divergence above the library boundary (error text,
//! crash behavior) that the differential checker cannot see.

use std::ffi::OsStr;
use std::process::Command;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A finished child process as a comparable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedOutput {
    /// Program that was run.
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,

    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,

    /// Standard output followed by standard error.
    pub combined: Vec<u8>,
}

impl CapturedOutput {
    /// Whether the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Combined output decoded lossily as UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.combined).into_owned()
    }

    /// Human-readable command line.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Fail with [`Error::ProcessFailure`] unless the process exited zero.
    pub fn ensure_success(self) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }

        let status = self
            .exit_code
            .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit code {code}"));
        Err(Error::ProcessFailure {
            message: format!("failed executing {}: {status}", self.command_line()),
            output: self.text(),
        })
    }
}

/// Run `command` to completion and capture its output. No timeout is applied.
pub fn run_captured(command: &mut Command) -> Result<CapturedOutput> {
    let program = lossy(command.get_program());
    let args: Vec<String> = command.get_args().map(lossy).collect();

    debug!("running {program} {}", args.join(" "));
    let output = command.output().map_err(|e| Error::ProcessFailure {
        message: format!("failed to spawn {program}: {e}"),
        output: String::new(),
    })?;

    let mut combined = output.stdout;
    combined.extend_from_slice(&output.stderr);

    Ok(CapturedOutput {
        program,
        args,
        exit_code: output.status.code(),
        combined,
    })
}

fn lossy(s: &OsStr) -> String {
    s.to_string_lossy().into_owned()
}

/// Compares the observable output of a reference and a candidate program.
#[derive(Debug)]
pub struct ExecutableParity {
    reference: Command,
    candidate: Command,
}

impl ExecutableParity {
    /// Create a parity check from two fully configured commands.
    #[must_use]
    pub fn new(reference: Command, candidate: Command) -> Self {
        Self { reference, candidate }
    }

    /// Run both programs in sequence and compare their output.
    ///
    /// Returns the shared output when both succeed and agree.
    pub fn check(mut self) -> Result<CapturedOutput> {
        let reference = run_captured(&mut self.reference)?.ensure_success()?;
        let candidate = run_captured(&mut self.candidate)?.ensure_success()?;

        if reference.combined != candidate.combined {
            return Err(Error::ProcessFailure {
                message: format!(
                    "output of {} differs from {}",
                    candidate.command_line(),
                    reference.command_line()
                ),
                output: format!(
                    "reference:\n{}\ncandidate:\n{}",
                    reference.text(),
                    candidate.text()
                ),
            });
        }

        Ok(reference)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn test_capture_combines_stdout_then_stderr() {
        let out = run_captured(&mut sh("echo err 1>&2; echo out")).unwrap();
        assert!(out.success());
        assert_eq!(out.text(), "out\nerr\n");
        assert_eq!(out.program, "sh");
    }

    #[test]
    fn test_nonzero_exit_is_process_failure_with_output() {
        let out = run_captured(&mut sh("echo broken; exit 3")).unwrap();
        assert_eq!(out.exit_code, Some(3));

        let err = out.ensure_success().unwrap_err();
        match err {
            Error::ProcessFailure { message, output } => {
                assert!(message.contains("exit code 3"));
                assert_eq!(output, "broken\n");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_spawn_failure() {
        let err = run_captured(&mut Command::new("/nonexistent/program")).unwrap_err();
        assert!(matches!(err, Error::ProcessFailure { .. }));
    }

    #[test]
    fn test_parity_equal_outputs() {
        let shared = ExecutableParity::new(sh("printf 600x239"), sh("printf 600x239"))
            .check()
            .unwrap();
        assert_eq!(shared.text(), "600x239");
    }

    #[test]
    fn test_parity_divergent_outputs() {
        let err = ExecutableParity::new(sh("printf 600x239"), sh("printf 600x240"))
            .check()
            .unwrap_err();
        match err {
            Error::ProcessFailure { output, .. } => {
                assert!(output.contains("600x239"));
                assert!(output.contains("600x240"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parity_fails_when_candidate_crashes() {
        let err = ExecutableParity::new(sh("printf ok"), sh("printf ok; exit 1"))
            .check()
            .unwrap_err();
        assert!(matches!(err, Error::ProcessFailure { .. }));
    }
}

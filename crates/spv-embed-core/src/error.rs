//! Pipeline error types

use std::path::PathBuf;
use thiserror::Error;

/// Exit status used for invocation mistakes (no usable `-o` flag)
pub const USAGE_EXIT_CODE: u8 = 2;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("no output path given (expected `-o <path>` or `-o=<path>`)")]
    NoOutputPath,

    #[error("output flag `{0}` is missing its path")]
    MissingFlagValue(String),

    #[error("output path {0:?} has no file name to derive an array name from")]
    InvalidOutputPath(PathBuf),

    #[error("failed to run compiler {program:?}: {error}")]
    Spawn {
        program: PathBuf,
        error: std::io::Error,
    },

    #[error("compiler {program:?} failed ({})", describe_status(.status))]
    CompilerFailed {
        program: PathBuf,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error(
        "Output {path:?} not found\nstdout: {}\nstderr: {}",
        .stdout.as_deref().unwrap_or("None"),
        .stderr.as_deref().unwrap_or("None")
    )]
    MissingOutput {
        path: PathBuf,
        stdout: Option<String>,
        stderr: Option<String>,
    },

    #[error("failed to create output directory {0:?}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("failed to read compiler output {0:?}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("failed to write generated header {0:?}: {1}")]
    Write(PathBuf, std::io::Error),
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl EmbedError {
    /// Whether the error comes from how the tool was invoked
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            EmbedError::NoOutputPath
                | EmbedError::MissingFlagValue(_)
                | EmbedError::InvalidOutputPath(_)
        )
    }

    /// Process exit status to report for this error. Never zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            _ if self.is_usage() => USAGE_EXIT_CODE,
            EmbedError::CompilerFailed { status: Some(code), .. } => {
                u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }
}

/// Lossy text view of a captured stream, `None` when nothing was written
pub(crate) fn captured_text(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(bytes).into_owned())
    }
}

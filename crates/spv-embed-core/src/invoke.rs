//! Running the external compiler

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::EmbedError;

/// What a finished compiler run left behind
#[derive(Debug, Clone, Default)]
pub struct CompilerOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    /// Whether the process reported success
    pub success: bool,
    /// Captured standard output
    pub stdout: Vec<u8>,
    /// Captured standard error
    pub stderr: Vec<u8>,
}

impl CompilerOutput {
    /// A successful run with nothing captured
    pub fn succeeded() -> Self {
        Self {
            status: Some(0),
            success: true,
            ..Default::default()
        }
    }

    /// A run that exited with `code`
    pub fn exited(code: i32) -> Self {
        Self {
            status: Some(code),
            success: code == 0,
            ..Default::default()
        }
    }
}

/// Executes the compiler and blocks until it exits.
///
/// `args` is the full command line; `args[0]` is replaced by `program`.
pub trait CompilerRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CompilerOutput, EmbedError>;
}

impl<T: CompilerRunner + ?Sized> CompilerRunner for &T {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CompilerOutput, EmbedError> {
        (**self).run(program, args)
    }
}

/// Runs the compiler as a child process with the current environment
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CompilerRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CompilerOutput, EmbedError> {
        let forwarded = args.get(1..).unwrap_or_default();
        log::debug!("Running {:?} {:?}", program, forwarded);

        let output = Command::new(program)
            .args(forwarded)
            .output()
            .map_err(|error| EmbedError::Spawn {
                program: program.to_path_buf(),
                error,
            })?;

        log::debug!("{:?} exited with {}", program, output.status);

        Ok(CompilerOutput {
            status: output.status.code(),
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

//! Compile-and-embed pipeline
//!
//! One run, in order:
//! 1. find the output path (usage errors stop here, nothing is executed)
//! 2. create the output directory
//! 3. run the compiler and require a zero exit
//! 4. check the output exists, read it and decode it into words
//! 5. overwrite it with the generated header

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::find_output_path;
use crate::codec::{self, DEFAULT_WORDS_PER_LINE};
use crate::error::captured_text;
use crate::invoke::CompilerRunner;
use crate::resolver::{DEFAULT_COMPILER, resolve_compiler};
use crate::EmbedError;

/// Settings resolved once at startup
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// SDK installation root, if the environment named one
    pub install_root: Option<PathBuf>,
    /// Compiler executable name
    pub compiler_name: String,
    /// Array values per generated row
    pub words_per_line: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            install_root: None,
            compiler_name: DEFAULT_COMPILER.to_string(),
            words_per_line: DEFAULT_WORDS_PER_LINE,
        }
    }
}

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
    pub output: PathBuf,
    pub array_name: String,
    pub words: usize,
    pub dropped_bytes: usize,
}

pub struct Pipeline<R> {
    options: PipelineOptions,
    runner: R,
}

impl<R: CompilerRunner> Pipeline<R> {
    pub fn new(options: PipelineOptions, runner: R) -> Self {
        Self { options, runner }
    }

    /// The program that will be executed in place of `args[0]`
    pub fn compiler(&self) -> PathBuf {
        resolve_compiler(self.options.install_root.as_deref(), &self.options.compiler_name)
    }

    /// Run the compiler with `args` and replace its output with a header
    pub fn run(&self, args: &[OsString]) -> Result<EmbedReport, EmbedError> {
        let output = find_output_path(args)?;
        // Derive the name before running so a bad path never reaches the compiler
        let name = codec::array_name(&output)?;

        ensure_parent_dir(&output)?;

        let program = self.compiler();
        let result = self.runner.run(&program, args)?;

        if !result.success {
            return Err(EmbedError::CompilerFailed {
                program,
                status: result.status,
                stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            });
        }

        if !output.is_file() {
            return Err(EmbedError::MissingOutput {
                path: output,
                stdout: captured_text(&result.stdout),
                stderr: captured_text(&result.stderr),
            });
        }

        let bytes = fs::read(&output).map_err(|e| EmbedError::Read(output.clone(), e))?;
        let words = codec::decode_words(&bytes);
        let header = codec::render_header(&name, &words, self.options.words_per_line);

        fs::write(&output, header).map_err(|e| EmbedError::Write(output.clone(), e))?;

        log::info!("Embedded {} words from {:?} as `{}`", words.len(), output, name);

        Ok(EmbedReport {
            output,
            array_name: name,
            words: words.len(),
            dropped_bytes: bytes.len() % 4,
        })
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), EmbedError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| EmbedError::CreateDir(parent.to_path_buf(), e)),
        _ => Ok(()),
    }
}

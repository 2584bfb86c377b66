//! spv-embed core - compile a shader and embed the binary as a C++ array
//!
//! This crate provides:
//! - Compiler resolution from an SDK install root
//! - Output path discovery in a forwarded command line
//! - Compiler execution with captured output
//! - SPIR-V to header conversion

pub mod args;
pub mod codec;
pub mod error;
pub mod invoke;
pub mod pipeline;
pub mod resolver;

pub use args::find_output_path;
pub use codec::{DEFAULT_WORDS_PER_LINE, array_name, decode_words, render_header};
pub use error::EmbedError;
pub use invoke::{CompilerOutput, CompilerRunner, SystemRunner};
pub use pipeline::{EmbedReport, Pipeline, PipelineOptions};
pub use resolver::{DEFAULT_COMPILER, resolve_compiler};

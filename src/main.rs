//! spv-embed - compile a shader and rewrite the output as an embeddable header
//!
//! Usage: `spv-embed <compiler arguments...> -o <out.spv>`
//!
//! All arguments are forwarded to the compiler. Once it succeeds the output
//! file is replaced with a C++ header declaring `const uint32_t <name>[]`.

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Context;
use spv_embed_config::Config;
use spv_embed_core::{EmbedError, EmbedReport, Pipeline, PipelineOptions, SystemRunner};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(report) => {
            log::info!(
                "Wrote {:?} ({} words, array `{}`)",
                report.output,
                report.words,
                report.array_name
            );
            ExitCode::SUCCESS
        }
        Err(err) => report_error(&err),
    }
}

fn run() -> anyhow::Result<EmbedReport> {
    let config = Config::load().context("Failed to load configuration")?;

    let options = PipelineOptions {
        install_root: config.sdk_root(),
        compiler_name: config.compiler.name,
        words_per_line: config.output.words_per_line,
    };
    let pipeline = Pipeline::new(options, SystemRunner);
    log::debug!("Using compiler {:?}", pipeline.compiler());

    let args: Vec<OsString> = std::env::args_os().collect();
    Ok(pipeline.run(&args)?)
}

fn report_error(err: &anyhow::Error) -> ExitCode {
    eprintln!("error: {err:#}");

    match err.downcast_ref::<EmbedError>() {
        Some(embed) => {
            if let EmbedError::CompilerFailed { stdout, stderr, .. } = embed {
                if !stdout.is_empty() {
                    eprintln!("compiler stdout:\n{}", stdout.trim_end());
                }
                if !stderr.is_empty() {
                    eprintln!("compiler stderr:\n{}", stderr.trim_end());
                }
            }
            if embed.is_usage() {
                eprintln!("usage: spv-embed <compiler arguments...> -o <output>");
            }
            ExitCode::from(embed.exit_code())
        }
        None => ExitCode::FAILURE,
    }
}

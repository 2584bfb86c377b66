//! Compiler location

use std::path::{Path, PathBuf};

/// Compiler invoked when nothing else is configured
pub const DEFAULT_COMPILER: &str = "slangc";

/// Resolve what to execute as the compiler.
///
/// With an install root this is `<root>/bin/<name>`, otherwise the bare
/// name is returned and left to the `PATH` search. The result is not
/// checked for existence.
pub fn resolve_compiler(install_root: Option<&Path>, compiler_name: &str) -> PathBuf {
    match install_root {
        Some(root) => root.join("bin").join(compiler_name),
        None => PathBuf::from(compiler_name),
    }
}

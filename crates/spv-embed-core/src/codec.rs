//! SPIR-V words to C++ header text

use std::fmt::Write as _;
use std::path::Path;

use crate::EmbedError;

/// Words per array row when nothing else is configured
pub const DEFAULT_WORDS_PER_LINE: usize = 8;

const WORD_SIZE: usize = 4;

/// Reinterpret `bytes` as little-endian `u32` words.
///
/// A trailing partial word is dropped.
pub fn decode_words(bytes: &[u8]) -> Vec<u32> {
    let chunks = bytes.chunks_exact(WORD_SIZE);
    let dropped = chunks.remainder().len();
    if dropped > 0 {
        log::warn!(
            "Compiler output is {} bytes, dropping {} trailing byte(s)",
            bytes.len(),
            dropped
        );
    }

    chunks
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Array identifier for an output path: the file name without its extension
pub fn array_name(path: &Path) -> Result<String, EmbedError> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EmbedError::InvalidOutputPath(path.to_path_buf()))?;

    if !is_c_identifier(&name) {
        log::warn!("Array name {:?} is not a valid C identifier", name);
    }
    Ok(name)
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Render `words` as a header declaring `const uint32_t <name>[]`
pub fn render_header(name: &str, words: &[u32], words_per_line: usize) -> String {
    let per_line = if words_per_line == 0 {
        DEFAULT_WORDS_PER_LINE
    } else {
        words_per_line
    };

    let mut code = String::new();
    code.push_str("#pragma once\n");
    code.push_str("#include <cstdint>\n");
    let _ = writeln!(code, "const uint32_t {name}[] = {{");

    for row in words.chunks(per_line) {
        code.push_str("  ");
        for word in row {
            let _ = write!(code, "0x{word:08x},");
        }
        code.push('\n');
    }

    code.push_str("};\n");
    code
}

//! Output path discovery in a forwarded compiler command line

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::EmbedError;

/// Two-token spelling: `-o <path>`
pub const OUTPUT_FLAG: &str = "-o";
/// Fused spelling: `-o=<path>`
pub const FUSED_OUTPUT_PREFIX: &str = "-o=";

/// Find the path the compiler was told to write.
///
/// `args[0]` is the program name and is never inspected. The first output
/// flag wins; later ones are ignored. Arguments need not be valid UTF-8.
pub fn find_output_path(args: &[OsString]) -> Result<PathBuf, EmbedError> {
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        if arg == OUTPUT_FLAG {
            return rest
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| EmbedError::MissingFlagValue(OUTPUT_FLAG.to_string()));
        }

        if let Some(path) = strip_fused_prefix(arg) {
            if path.is_empty() {
                return Err(EmbedError::MissingFlagValue(FUSED_OUTPUT_PREFIX.to_string()));
            }
            return Ok(PathBuf::from(path));
        }
    }

    Err(EmbedError::NoOutputPath)
}

fn strip_fused_prefix(arg: &OsStr) -> Option<&OsStr> {
    let rest = arg
        .as_encoded_bytes()
        .strip_prefix(FUSED_OUTPUT_PREFIX.as_bytes())?;
    // SAFETY: `rest` directly follows the non-empty UTF-8 prefix `-o=`,
    // which is a valid split point of the encoded bytes.
    Some(unsafe { OsStr::from_encoded_bytes_unchecked(rest) })
}

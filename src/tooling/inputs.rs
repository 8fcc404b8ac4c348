//! Input collection: expand command-line arguments into files to embed.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// Path as the user spelled it, before normalization.
    pub logical: PathBuf,
    /// Where to read it from.
    pub source: PathBuf,
}

/// Expand `args` relative to `base`.
///
/// Files are kept as given; directories are walked recursively with entries
/// sorted by name so the output order does not depend on the host filesystem.
pub fn expand_inputs(base: &Path, args: &[PathBuf]) -> Result<Vec<InputFile>, CliError> {
    let mut inputs = Vec::new();
    for arg in args {
        let root = base.join(arg);
        for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let message = e.to_string();
                CliError::io(
                    format!("walk {}", root.display()),
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message)),
                )
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            let relative = entry.path().strip_prefix(&root).unwrap_or(Path::new(""));
            let logical = if relative.as_os_str().is_empty() {
                arg.clone()
            } else {
                arg.join(relative)
            };
            inputs.push(InputFile {
                logical,
                source: entry.path().to_path_buf(),
            });
        }
    }
    Ok(inputs)
}

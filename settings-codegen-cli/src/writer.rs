//! File output for generated artifacts.
//!
//! A generation run produces a header/source pair that must land together.
//! Both artifacts are staged as temporary files next to their targets and
//! only renamed into place once every staging write has succeeded, so a
//! failed run cannot leave a header from the new schema next to a source
//! file from the old one.

use crate::error::{CliResult, WriteError};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of one file of a pair write.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written successfully.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Dry run - content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        /// Path where content would have been written.
        path: PathBuf,
    },
}

/// Writer for the generated header/source pair, with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    /// Whether to run in dry-run mode.
    dry_run: bool,
}

impl FileWriter {
    /// Create a new file writer.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write the header/source pair.
    ///
    /// In dry-run mode, returns both contents without touching disk. In a
    /// real run, both artifacts are staged first; the final paths are only
    /// replaced after both staging writes succeed.
    pub fn write_pair(
        &self,
        header_path: &Path,
        header: &str,
        source_path: &Path,
        source: &str,
    ) -> CliResult<[WriteResult; 2]> {
        if self.dry_run {
            return Ok([
                WriteResult::DryRun {
                    content: header.to_string(),
                    path: header_path.to_path_buf(),
                },
                WriteResult::DryRun {
                    content: source.to_string(),
                    path: source_path.to_path_buf(),
                },
            ]);
        }

        let staged_header = stage(header_path, header)?;
        let staged_source = match stage(source_path, source) {
            Ok(path) => path,
            Err(e) => {
                let _ = fs::remove_file(&staged_header);
                return Err(e);
            }
        };

        if let Err(e) = commit(&staged_header, header_path) {
            let _ = fs::remove_file(&staged_header);
            let _ = fs::remove_file(&staged_source);
            return Err(e);
        }
        if let Err(e) = commit(&staged_source, source_path) {
            let _ = fs::remove_file(&staged_source);
            return Err(e);
        }

        Ok([
            WriteResult::Written {
                path: header_path.to_path_buf(),
                bytes: header.len(),
            },
            WriteResult::Written {
                path: source_path.to_path_buf(),
                bytes: source.len(),
            },
        ])
    }

    /// Check if running in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Byte-compare the on-disk pair against freshly generated artifacts.
pub fn artifacts_up_to_date(
    header_path: &Path,
    source_path: &Path,
    header: &str,
    source: &str,
) -> CliResult<bool> {
    let existing_header = fs::read_to_string(header_path)?;
    let existing_source = fs::read_to_string(source_path)?;
    Ok(existing_header == header && existing_source == source)
}

/// Write content to a staging file beside the target path.
fn stage(path: &Path, content: &str) -> CliResult<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let mut staged_name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new("artifact"))
        .to_os_string();
    staged_name.push(".tmp");
    let staged = path.with_file_name(staged_name);

    fs::write(&staged, content).map_err(|e| WriteError::WriteFile {
        path: staged.clone(),
        source: e,
    })?;

    Ok(staged)
}

/// Move a staged file onto its final path.
fn commit(staged: &Path, path: &Path) -> CliResult<()> {
    fs::rename(staged, path).map_err(|e| {
        WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        }
        .into()
    })
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } => path,
            WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the write was successful (not dry-run).
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }
}

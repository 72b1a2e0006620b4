use crate::types::Entry;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{} does not exist or is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("{} has no subdirectories", path.display())]
    Empty { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    NotADirectory,
    Empty,
    Unreadable,
}

impl ScanError {
    #[must_use]
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            ScanError::NotADirectory { .. } => ScanErrorKind::NotADirectory,
            ScanError::Empty { .. } => ScanErrorKind::Empty,
            ScanError::Unreadable { .. } => ScanErrorKind::Unreadable,
        }
    }

    /// Text shown to the user in the error message box.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ScanError::NotADirectory { .. } => {
                "The selected path does not exist as a directory.".to_string()
            }
            ScanError::Empty { .. } => "The selected directory has no subdirectories.".to_string(),
            ScanError::Unreadable { source, .. } => {
                format!("The selected directory could not be read ({source}).")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub skip_hidden: bool,
}

/// Result of a scan after parsing names into rows.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub root: PathBuf,
    pub entries: Vec<Entry>,
    pub skipped: Vec<String>,
}

/// Direct child directories of `root`, as absolute paths, in the order the
/// filesystem returns them.
pub fn list_subdirectories(root: &Path, options: ScanOptions) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let root = std::path::absolute(root).map_err(|source| ScanError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();
    for result in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match result {
            Ok(e) => e,
            // Failing to open the root itself is reported at depth 0
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed"));
                return Err(ScanError::Unreadable { path: root, source });
            }
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {e}", root.display());
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }
        if options.skip_hidden && entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        dirs.push(entry.into_path());
    }

    log::debug!("Found {} subdirectories in {}", dirs.len(), root.display());

    if dirs.is_empty() {
        return Err(ScanError::Empty { path: root });
    }
    Ok(dirs)
}

/// Scan `root` and parse each subdirectory name into an entry.
///
/// Names that do not split into exactly three fields are skipped and
/// collected in `ScanReport::skipped`.
pub fn scan_entries(root: &Path, options: ScanOptions) -> Result<ScanReport, ScanError> {
    let dirs = list_subdirectories(root, options)?;

    let mut entries = Vec::with_capacity(dirs.len());
    let mut skipped = Vec::new();
    for dir in &dirs {
        match Entry::from_path(dir) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                log::debug!("{e}");
                skipped.push(e.name);
            }
        }
    }

    Ok(ScanReport {
        root: std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf()),
        entries,
        skipped,
    })
}

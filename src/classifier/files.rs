//! Listing the mail files of a directory.

use super::ClassifierError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Returns the regular files directly inside `directory`, sorted by path.
///
/// Subdirectories are skipped, not descended into. Symbolic links are
/// followed, so a link to a file counts as a file; a link whose target is
/// gone is skipped.
///
/// # Errors
///
/// Returns [`ClassifierError::FileSystem`] if the directory cannot be listed,
/// and [`ClassifierError::Io`] naming the entry if an entry cannot be
/// inspected.
pub fn find_files(directory: &Path) -> Result<Vec<PathBuf>, ClassifierError> {
    let file_system_error = |source| ClassifierError::FileSystem {
        path: directory.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(directory).map_err(file_system_error)? {
        let path = entry.map_err(file_system_error)?.path();
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => files.push(path),
            Ok(_) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "skipped dangling entry");
            }
            Err(source) => return Err(ClassifierError::Io { path, source }),
        }
    }
    files.sort();

    tracing::debug!(directory = %directory.display(), files = files.len(), "listed directory");
    Ok(files)
}

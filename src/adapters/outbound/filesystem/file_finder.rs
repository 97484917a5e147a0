use std::fs;
use std::path::{Path, PathBuf};

use crate::ports::outbound::FileFinder;
use crate::shared::error::DepscoutError;
use crate::shared::Result;

/// Maximum file size for security (100 MB)
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// DirectoryFileFinder adapter for locating marker files on the file system.
///
/// Implements the FileFinder port with a non-recursive lookup: detectable
/// applicability is decided per directory, not per tree.
pub struct DirectoryFileFinder;

impl DirectoryFileFinder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DirectoryFileFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl FileFinder for DirectoryFileFinder {
    fn find_file(&self, directory: &Path, filename: &str) -> Option<PathBuf> {
        let candidate = directory.join(filename);
        // symlink_metadata so a dangling or hostile symlink never passes
        match fs::symlink_metadata(&candidate) {
            Ok(metadata) if metadata.is_file() => Some(candidate),
            _ => None,
        }
    }
}

/// Safely read a file with security checks:
/// - Reject symbolic links
/// - Check file size limits
/// - Validate file is a regular file
pub fn safe_read_to_string(path: &Path) -> Result<String> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DepscoutError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(DepscoutError::SecurityError {
            path: path.to_path_buf(),
            reason: "Path is a symbolic link".to_string(),
            hint: "For security reasons, symbolic links are not read".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(DepscoutError::FileReadError {
            path: path.to_path_buf(),
            details: "Not a regular file".to_string(),
        }
        .into());
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(DepscoutError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes, maximum is {} bytes)",
                metadata.len(),
                MAX_FILE_SIZE
            ),
            hint: "Oversized inputs are rejected to prevent resource exhaustion".to_string(),
        }
        .into());
    }

    fs::read_to_string(path).map_err(|e| {
        DepscoutError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

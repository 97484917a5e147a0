use std::path::{Path, PathBuf};

/// FileFinder port for detectable applicability checks.
///
/// Returns the path of `filename` directly inside `directory`, or `None`
/// when it is absent. Absence is an expected outcome, not an error: it is
/// how a detectable decides it does not apply to a source tree.
pub trait FileFinder {
    fn find_file(&self, directory: &Path, filename: &str) -> Option<PathBuf>;
}

use std::fmt;

/// Outcome of an applicability or extractability check.
///
/// Failure variants carry enough context to render a human description;
/// the description is what ends up in issues and the run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectableResult {
    Passed,
    /// None of the listed marker files were found.
    FilesNotFound(Vec<String>),
    /// A manifest was found but its required companion file was not.
    CompanionFileNotFound {
        directory: String,
        companion: String,
    },
    /// A required external tool could not be invoked.
    ExecutableNotFound(String),
    /// An extractability check raised an internal error; converted here so
    /// a detectable never crashes the overall run.
    Exception(String),
}

impl DetectableResult {
    pub fn passed(&self) -> bool {
        matches!(self, DetectableResult::Passed)
    }

    pub fn description(&self) -> String {
        format!("{}", self)
    }
}

impl fmt::Display for DetectableResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectableResult::Passed => write!(f, "Passed."),
            DetectableResult::FilesNotFound(names) => {
                write!(f, "No files were found with any of the patterns: {}", names.join(", "))
            }
            DetectableResult::CompanionFileNotFound { directory, companion } => write!(
                f,
                "A {} file was NOT found in {}. Please run the package manager so the file is generated.",
                companion, directory
            ),
            DetectableResult::ExecutableNotFound(command) => {
                write!(f, "The executable '{}' could not be invoked.", command)
            }
            DetectableResult::Exception(details) => {
                write!(f, "An exception occurred: {}", details)
            }
        }
    }
}

/// Detectable lifecycle: the uniform three-phase contract every ecosystem
/// adapter implements, plus the result and extraction types it trades in.
pub mod extraction;
pub mod result;

use std::path::{Path, PathBuf};

pub use extraction::Extraction;
pub use result::DetectableResult;

use crate::graph::Forge;
use crate::shared::Result;

/// Where a detectable looks for its marker files.
#[derive(Debug, Clone)]
pub struct DetectableEnvironment {
    directory: PathBuf,
}

impl DetectableEnvironment {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Lifecycle position of a detectable, tracked by the pipeline so "which
/// gate failed" is a first-class, reportable fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectableState {
    Created,
    ApplicableChecked,
    ExtractableChecked,
    Extracted,
    /// Applicability gate did not pass; expected and silent.
    Skipped,
    /// A later gate failed; carries which one.
    Failed(FailedGate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedGate {
    Extractable,
    Extraction,
}

/// One package-manager ecosystem adapter.
///
/// The pipeline drives `applicable` -> `extractable` -> `extract` in order
/// and never calls a later phase when an earlier gate failed. `extractable`
/// may itself error; the pipeline converts that into a failed result rather
/// than letting it cross the detectable boundary. `extract` is only invoked
/// after both gates pass.
pub trait Detectable {
    /// Short uppercase name used in statuses and the run report.
    fn name(&self) -> &'static str;

    fn forge(&self) -> Forge;

    /// Inspect the target directory for required marker files.
    fn applicable(&mut self) -> DetectableResult;

    /// Verify preconditions beyond mere presence (companion files,
    /// callable external tools).
    fn extractable(&mut self) -> Result<DetectableResult>;

    /// Produce the extraction. Any panic here is a defect guarded at the
    /// pipeline boundary, not a normal failure path.
    fn extract(&mut self) -> Extraction;
}

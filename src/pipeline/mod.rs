//! Run orchestration: drives every registered detectable against one
//! target directory, gathers code locations and builds the run report.

pub mod code_location;
pub mod report;
pub mod tool;

pub use code_location::{CodeLocation, CodeLocationConverter};
pub use report::RunReport;
pub use tool::{DetectableTool, DetectableToolResult, ProjectInfo};

use std::path::Path;

use tracing::{debug, info};

use crate::detectable::{Detectable, DetectableState};
use crate::ports::outbound::EventSink;

/// Everything a finished run produced, before reporting.
#[derive(Debug)]
pub struct PipelineRun {
    pub code_locations: Vec<CodeLocation>,
    /// First successful detectable's project identity; later ones do not
    /// override it.
    pub project_info: Option<ProjectInfo>,
    pub states: Vec<(String, DetectableState)>,
}

/// Run every detectable against the target, in registration order.
///
/// Detectables are independent: one failing never stops the others, and
/// the event sink accumulates the statuses and exit code requests that
/// determine the run's outcome.
pub fn run_detectables(
    mut detectables: Vec<Box<dyn Detectable>>,
    source_path: &Path,
    events: &dyn EventSink,
) -> PipelineRun {
    let mut run = PipelineRun {
        code_locations: Vec::new(),
        project_info: None,
        states: Vec::new(),
    };

    for detectable in detectables.iter_mut() {
        let name = detectable.name().to_string();
        debug!(detectable = %name, "Starting detectable");
        let result = DetectableTool::execute(detectable.as_mut(), source_path, events);

        if result.state == DetectableState::Extracted {
            info!(
                detectable = %name,
                code_locations = result.code_locations.len(),
                "Detectable extracted"
            );
        }
        run.code_locations.extend(result.code_locations);
        if run.project_info.is_none() {
            run.project_info = result.project_info;
        }
        run.states.push((name, result.state));
    }

    run
}

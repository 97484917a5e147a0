use std::path::Path;

use tracing::{debug, error};

use crate::detectable::{
    Detectable, DetectableResult, DetectableState, Extraction, FailedGate,
};
use crate::ports::outbound::{
    EventSink, ExitCodeRequest, Issue, IssueId, Status, StatusType,
};
use crate::shared::ExitCode;

use super::code_location::{CodeLocation, CodeLocationConverter};

/// Project identity one detectable proposed for the whole run.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub detectable_name: String,
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Outcome of driving one detectable through its lifecycle.
#[derive(Debug)]
pub struct DetectableToolResult {
    pub state: DetectableState,
    pub code_locations: Vec<CodeLocation>,
    pub project_info: Option<ProjectInfo>,
}

impl DetectableToolResult {
    fn skip() -> Self {
        Self {
            state: DetectableState::Skipped,
            code_locations: Vec::new(),
            project_info: None,
        }
    }

    fn failed(gate: FailedGate) -> Self {
        Self {
            state: DetectableState::Failed(gate),
            code_locations: Vec::new(),
            project_info: None,
        }
    }
}

/// Drives one detectable through applicable, extractable and extract.
///
/// Gate failures and extraction errors never escape this function; they
/// become statuses, issues and exit code requests on the event sink. A
/// not-applicable detectable is skipped silently and publishes nothing.
pub struct DetectableTool;

impl DetectableTool {
    pub fn execute(
        detectable: &mut dyn Detectable,
        source_path: &Path,
        events: &dyn EventSink,
    ) -> DetectableToolResult {
        let name = detectable.name();

        let applicable = detectable.applicable();
        if !applicable.passed() {
            debug!(detectable = name, "Was not applicable.");
            return DetectableToolResult::skip();
        }
        debug!(detectable = name, "Applicable passed.");

        let extractable = match detectable.extractable() {
            Ok(result) => result,
            Err(e) => DetectableResult::Exception(e.to_string()),
        };
        if !extractable.passed() {
            let description = extractable.description();
            error!(detectable = name, "Was not extractable: {}", description);
            events.publish_status(Status::new(name, StatusType::Failure));
            events.publish_issue(Issue::new(
                IssueId::DetectableNotExtractable,
                vec![description.clone()],
            ));
            events.publish_exit_code(ExitCodeRequest::new(ExitCode::ExtractionFailure, description));
            return DetectableToolResult::failed(FailedGate::Extractable);
        }
        debug!(detectable = name, "Extractable passed.");

        let extraction = detectable.extract();
        let Extraction::Success {
            graphs,
            project_name,
            project_version,
        } = extraction
        else {
            let description = extraction
                .description()
                .unwrap_or("Extraction was not a success.")
                .to_string();
            error!(detectable = name, "Extraction was not a success: {}", description);
            events.publish_status(Status::new(name, StatusType::Failure));
            events.publish_issue(Issue::new(
                IssueId::DetectableExtractionFailed,
                vec![description.clone()],
            ));
            events.publish_exit_code(ExitCodeRequest::new(ExitCode::ExtractionFailure, description));
            return DetectableToolResult::failed(FailedGate::Extraction);
        };

        debug!(detectable = name, "Extraction success.");
        events.publish_status(Status::new(name, StatusType::Success));

        let code_locations =
            CodeLocationConverter::convert(source_path, name, detectable.forge(), graphs);

        let project_info = if project_name.is_some() || project_version.is_some() {
            Some(ProjectInfo {
                detectable_name: name.to_string(),
                name: project_name,
                version: project_version,
            })
        } else {
            None
        };

        DetectableToolResult {
            state: DetectableState::Extracted,
            code_locations,
            project_info,
        }
    }
}

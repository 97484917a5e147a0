use serde::Serialize;

use crate::shared::ExitCode;

/// Per-detectable outcome recorded in the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusType {
    Success,
    Failure,
}

#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub detectable_name: String,
    pub status: StatusType,
}

impl Status {
    pub fn new(detectable_name: impl Into<String>, status: StatusType) -> Self {
        Self {
            detectable_name: detectable_name.into(),
            status,
        }
    }
}

/// Stable identifiers for itemized issues, so downstream report consumers
/// can match on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueId {
    DetectableNotExtractable,
    DetectableExtractionFailed,
}

#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub id: IssueId,
    pub messages: Vec<String>,
}

impl Issue {
    pub fn new(id: IssueId, messages: Vec<String>) -> Self {
        Self { id, messages }
    }
}

/// A request to influence the run's final exit code. The run exits with
/// the worst code requested across all detectables.
#[derive(Debug, Clone)]
pub struct ExitCodeRequest {
    pub exit_code: ExitCode,
    pub reason: String,
}

impl ExitCodeRequest {
    pub fn new(exit_code: ExitCode, reason: impl Into<String>) -> Self {
        Self {
            exit_code,
            reason: reason.into(),
        }
    }
}

/// EventSink port: the per-run diagnostics channel.
///
/// Append-only and message-atomic: implementations must tolerate
/// interleaved writes from independently-running detectables without
/// corrupting individual records.
pub trait EventSink: Send + Sync {
    fn publish_status(&self, status: Status);
    fn publish_issue(&self, issue: Issue);
    fn publish_exit_code(&self, request: ExitCodeRequest);
}

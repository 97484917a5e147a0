use std::sync::Mutex;

use crate::ports::outbound::{EventSink, ExitCodeRequest, Issue, Status};
use crate::shared::ExitCode;

#[derive(Debug, Default)]
struct Recorded {
    statuses: Vec<Status>,
    issues: Vec<Issue>,
    exit_code_requests: Vec<ExitCodeRequest>,
}

/// EventRecorder adapter: the append-only per-run event channel.
///
/// Each publish takes the lock for exactly one record, so interleaved
/// writes from independently-running detectables stay message-atomic.
#[derive(Debug, Default)]
pub struct EventRecorder {
    recorded: Mutex<Recorded>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<Status> {
        self.recorded.lock().expect("event channel poisoned").statuses.clone()
    }

    pub fn issues(&self) -> Vec<Issue> {
        self.recorded.lock().expect("event channel poisoned").issues.clone()
    }

    /// The worst exit code requested so far; `Success` when none was.
    pub fn worst_exit_code(&self) -> ExitCode {
        self.recorded
            .lock()
            .expect("event channel poisoned")
            .exit_code_requests
            .iter()
            .fold(ExitCode::Success, |worst, request| {
                worst.worst(request.exit_code)
            })
    }
}

impl EventSink for EventRecorder {
    fn publish_status(&self, status: Status) {
        self.recorded.lock().expect("event channel poisoned").statuses.push(status);
    }

    fn publish_issue(&self, issue: Issue) {
        self.recorded.lock().expect("event channel poisoned").issues.push(issue);
    }

    fn publish_exit_code(&self, request: ExitCodeRequest) {
        self.recorded
            .lock()
            .expect("event channel poisoned")
            .exit_code_requests
            .push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{IssueId, StatusType};

    #[test]
    fn test_records_statuses_in_order() {
        let recorder = EventRecorder::new();
        recorder.publish_status(Status::new("YARN", StatusType::Success));
        recorder.publish_status(Status::new("GRADLE", StatusType::Failure));

        let statuses = recorder.statuses();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].detectable_name, "YARN");
        assert_eq!(statuses[1].status, StatusType::Failure);
    }

    #[test]
    fn test_records_issues() {
        let recorder = EventRecorder::new();
        recorder.publish_issue(Issue::new(
            IssueId::DetectableNotExtractable,
            vec!["yarn.lock was not found".to_string()],
        ));

        let issues = recorder.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, IssueId::DetectableNotExtractable);
    }

    #[test]
    fn test_worst_exit_code_defaults_to_success() {
        let recorder = EventRecorder::new();
        assert_eq!(recorder.worst_exit_code(), ExitCode::Success);
    }

    #[test]
    fn test_worst_exit_code_accumulates() {
        let recorder = EventRecorder::new();
        recorder.publish_exit_code(ExitCodeRequest::new(
            ExitCode::ExtractionFailure,
            "yarn extraction failed",
        ));
        recorder.publish_exit_code(ExitCodeRequest::new(ExitCode::Success, "gradle ok"));

        assert_eq!(recorder.worst_exit_code(), ExitCode::ExtractionFailure);
    }

    #[test]
    fn test_interleaved_writes_from_threads() {
        use std::sync::Arc;

        let recorder = Arc::new(EventRecorder::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let recorder = Arc::clone(&recorder);
                std::thread::spawn(move || {
                    recorder.publish_status(Status::new(format!("D{}", i), StatusType::Success));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(recorder.statuses().len(), 8);
    }
}

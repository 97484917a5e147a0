/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the narrow interfaces the extraction core uses to
/// reach external collaborators (file system, process execution, the
/// per-run event channel).
pub mod event_sink;
pub mod executable_runner;
pub mod file_finder;

pub use event_sink::{EventSink, ExitCodeRequest, Issue, IssueId, Status, StatusType};
pub use executable_runner::{ExecutableOutput, ExecutableRunner, ExecutableRunnerError};
pub use file_finder::FileFinder;

pub mod model;
pub mod parser;
pub mod transformer;

use std::path::PathBuf;

use tracing::debug;

use crate::adapters::outbound::filesystem::safe_read_to_string;
use crate::detectable::{Detectable, DetectableEnvironment, DetectableResult, Extraction};
use crate::graph::Forge;
use crate::ports::outbound::FileFinder;
use crate::shared::Result;

use transformer::GradleReportTransformer;

pub const BUILD_GRADLE_FILENAMES: [&str; 2] = ["build.gradle", "build.gradle.kts"];
pub const DEPENDENCY_REPORT_FILENAME: &str = "gradle-dependencies.txt";

/// Gradle ecosystem adapter.
///
/// Applicable when a Gradle build script is present; extractable only when
/// the dependency report (the output of `gradle dependencies`) sits next to
/// it, since the report is the actual parse input.
pub struct GradleDetectable<F: FileFinder> {
    environment: DetectableEnvironment,
    file_finder: F,
    dependency_report: Option<PathBuf>,
}

impl<F: FileFinder> GradleDetectable<F> {
    pub fn new(environment: DetectableEnvironment, file_finder: F) -> Self {
        Self {
            environment,
            file_finder,
            dependency_report: None,
        }
    }

    fn root_project_name(&self) -> String {
        self.environment
            .directory()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string())
    }
}

impl<F: FileFinder> Detectable for GradleDetectable<F> {
    fn name(&self) -> &'static str {
        "GRADLE"
    }

    fn forge(&self) -> Forge {
        Forge::Maven
    }

    fn applicable(&mut self) -> DetectableResult {
        let found = BUILD_GRADLE_FILENAMES
            .iter()
            .any(|filename| self.file_finder.find_file(self.environment.directory(), filename).is_some());
        if !found {
            return DetectableResult::FilesNotFound(
                BUILD_GRADLE_FILENAMES.iter().map(|s| s.to_string()).collect(),
            );
        }
        DetectableResult::Passed
    }

    fn extractable(&mut self) -> Result<DetectableResult> {
        self.dependency_report = self
            .file_finder
            .find_file(self.environment.directory(), DEPENDENCY_REPORT_FILENAME);
        if self.dependency_report.is_none() {
            return Ok(DetectableResult::CompanionFileNotFound {
                directory: self.environment.directory().display().to_string(),
                companion: DEPENDENCY_REPORT_FILENAME.to_string(),
            });
        }
        Ok(DetectableResult::Passed)
    }

    fn extract(&mut self) -> Extraction {
        let Some(report_path) = self.dependency_report.clone() else {
            return Extraction::failure("The dependency report was not located before extraction.");
        };

        let report = match safe_read_to_string(&report_path) {
            Ok(report) => report,
            Err(e) => return Extraction::failure(e.to_string()),
        };

        let root_name = self.root_project_name();
        debug!(report = %report_path.display(), root = %root_name, "Parsing Gradle dependency report");

        match GradleReportTransformer::new().transform(&report, &root_name) {
            Ok(graphs) => Extraction::success_with_project(graphs, Some(root_name), None),
            Err(e) => Extraction::failure(e.to_string()),
        }
    }
}

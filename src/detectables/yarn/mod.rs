pub mod lockfile;
pub mod package_json;
pub mod transformer;

use std::path::PathBuf;

use tracing::debug;

use crate::adapters::outbound::filesystem::safe_read_to_string;
use crate::detectable::{Detectable, DetectableEnvironment, DetectableResult, Extraction};
use crate::graph::Forge;
use crate::ports::outbound::FileFinder;
use crate::shared::Result;

use lockfile::parse_yarn_lock;
use package_json::parse_package_json;
use transformer::YarnTransformer;

pub const PACKAGE_JSON_FILENAME: &str = "package.json";
pub const YARN_LOCK_FILENAME: &str = "yarn.lock";

/// Yarn ecosystem adapter: merges package.json and yarn.lock.
pub struct YarnDetectable<F: FileFinder> {
    environment: DetectableEnvironment,
    file_finder: F,
    production_only: bool,
    package_json: Option<PathBuf>,
    yarn_lock: Option<PathBuf>,
}

impl<F: FileFinder> YarnDetectable<F> {
    pub fn new(environment: DetectableEnvironment, file_finder: F, production_only: bool) -> Self {
        Self {
            environment,
            file_finder,
            production_only,
            package_json: None,
            yarn_lock: None,
        }
    }
}

impl<F: FileFinder> Detectable for YarnDetectable<F> {
    fn name(&self) -> &'static str {
        "YARN"
    }

    fn forge(&self) -> Forge {
        Forge::Npm
    }

    fn applicable(&mut self) -> DetectableResult {
        self.package_json = self
            .file_finder
            .find_file(self.environment.directory(), PACKAGE_JSON_FILENAME);
        if self.package_json.is_none() {
            return DetectableResult::FilesNotFound(vec![PACKAGE_JSON_FILENAME.to_string()]);
        }
        DetectableResult::Passed
    }

    fn extractable(&mut self) -> Result<DetectableResult> {
        self.yarn_lock = self
            .file_finder
            .find_file(self.environment.directory(), YARN_LOCK_FILENAME);
        if self.yarn_lock.is_none() {
            return Ok(DetectableResult::CompanionFileNotFound {
                directory: self.environment.directory().display().to_string(),
                companion: YARN_LOCK_FILENAME.to_string(),
            });
        }
        Ok(DetectableResult::Passed)
    }

    fn extract(&mut self) -> Extraction {
        let (Some(package_json_path), Some(yarn_lock_path)) =
            (self.package_json.clone(), self.yarn_lock.clone())
        else {
            return Extraction::failure("Input files were not located before extraction.");
        };

        let manifest_content = match safe_read_to_string(&package_json_path) {
            Ok(content) => content,
            Err(e) => return Extraction::failure(e.to_string()),
        };
        let package_json = match parse_package_json(&manifest_content) {
            Ok(package_json) => package_json,
            Err(e) => return Extraction::failure(e.to_string()),
        };

        let lock_content = match safe_read_to_string(&yarn_lock_path) {
            Ok(content) => content,
            Err(e) => return Extraction::failure(e.to_string()),
        };
        let yarn_lock = parse_yarn_lock(&lock_content);

        debug!(
            entries = yarn_lock.entries.len(),
            production_only = self.production_only,
            "Merging package.json with yarn.lock"
        );

        let transformer = YarnTransformer::new(&yarn_lock_path);
        match transformer.transform(&package_json, &yarn_lock, self.production_only) {
            Ok(graph) => {
                let logical_name = package_json.name.clone().unwrap_or_else(|| "yarn".to_string());
                let mut graphs = std::collections::BTreeMap::new();
                graphs.insert(logical_name, graph);
                Extraction::success_with_project(graphs, package_json.name, package_json.version)
            }
            Err(e) => Extraction::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::filesystem::DirectoryFileFinder;
    use std::fs;
    use tempfile::TempDir;

    fn detectable(dir: &TempDir, production_only: bool) -> YarnDetectable<DirectoryFileFinder> {
        YarnDetectable::new(
            DetectableEnvironment::new(dir.path()),
            DirectoryFileFinder::new(),
            production_only,
        )
    }

    #[test]
    fn test_not_applicable_without_package_json() {
        let dir = TempDir::new().unwrap();
        assert!(!detectable(&dir, false).applicable().passed());
    }

    #[test]
    fn test_not_extractable_without_yarn_lock() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON_FILENAME), "{}").unwrap();
        let mut yarn = detectable(&dir, false);

        assert!(yarn.applicable().passed());
        let result = yarn.extractable().unwrap();
        assert!(!result.passed());
        assert!(result.description().contains(YARN_LOCK_FILENAME));
    }

    #[test]
    fn test_full_extraction() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON_FILENAME),
            r#"{ "name": "my-app", "version": "0.1.0", "dependencies": { "lib-a": "^1.0" } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(YARN_LOCK_FILENAME),
            "lib-a@^1.0:\n  version \"1.2.0\"\n",
        )
        .unwrap();
        let mut yarn = detectable(&dir, false);

        assert!(yarn.applicable().passed());
        assert!(yarn.extractable().unwrap().passed());
        match yarn.extract() {
            Extraction::Success {
                graphs,
                project_name,
                project_version,
            } => {
                assert_eq!(project_name.as_deref(), Some("my-app"));
                assert_eq!(project_version.as_deref(), Some("0.1.0"));
                assert_eq!(graphs["my-app"].node_count(), 1);
            }
            Extraction::Failure { description } => panic!("extraction failed: {}", description),
        }
    }

    #[test]
    fn test_malformed_package_json_fails_extraction_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON_FILENAME), "{ not json").unwrap();
        fs::write(dir.path().join(YARN_LOCK_FILENAME), "").unwrap();
        let mut yarn = detectable(&dir, false);

        yarn.applicable();
        yarn.extractable().unwrap();
        let extraction = yarn.extract();
        assert!(!extraction.is_success());
        assert!(extraction.description().unwrap().contains("package.json"));
    }
}

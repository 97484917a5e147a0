pub mod extractor;

use std::path::PathBuf;

use tracing::debug;

use crate::adapters::outbound::filesystem::safe_read_to_string;
use crate::detectable::{Detectable, DetectableEnvironment, DetectableResult, Extraction};
use crate::graph::Forge;
use crate::ports::outbound::FileFinder;
use crate::shared::Result;

use extractor::{parse_project_name_version, CargoLockExtractor};

pub const CARGO_LOCK_FILENAME: &str = "Cargo.lock";
pub const CARGO_TOML_FILENAME: &str = "Cargo.toml";

/// Cargo ecosystem adapter: reads the full resolution from Cargo.lock.
///
/// A directory with only a Cargo.toml is recognized but not extractable;
/// the lockfile is the companion that carries pinned versions.
pub struct CargoDetectable<F: FileFinder> {
    environment: DetectableEnvironment,
    file_finder: F,
    cargo_lock: Option<PathBuf>,
    cargo_toml: Option<PathBuf>,
}

impl<F: FileFinder> CargoDetectable<F> {
    pub fn new(environment: DetectableEnvironment, file_finder: F) -> Self {
        Self {
            environment,
            file_finder,
            cargo_lock: None,
            cargo_toml: None,
        }
    }
}

impl<F: FileFinder> Detectable for CargoDetectable<F> {
    fn name(&self) -> &'static str {
        "CARGO"
    }

    fn forge(&self) -> Forge {
        Forge::Crates
    }

    fn applicable(&mut self) -> DetectableResult {
        self.cargo_lock = self
            .file_finder
            .find_file(self.environment.directory(), CARGO_LOCK_FILENAME);
        self.cargo_toml = self
            .file_finder
            .find_file(self.environment.directory(), CARGO_TOML_FILENAME);
        if self.cargo_lock.is_none() && self.cargo_toml.is_none() {
            return DetectableResult::FilesNotFound(vec![
                CARGO_LOCK_FILENAME.to_string(),
                CARGO_TOML_FILENAME.to_string(),
            ]);
        }
        DetectableResult::Passed
    }

    fn extractable(&mut self) -> Result<DetectableResult> {
        if self.cargo_lock.is_none() {
            return Ok(DetectableResult::CompanionFileNotFound {
                directory: self.environment.directory().display().to_string(),
                companion: CARGO_LOCK_FILENAME.to_string(),
            });
        }
        Ok(DetectableResult::Passed)
    }

    fn extract(&mut self) -> Extraction {
        let Some(lockfile_path) = self.cargo_lock.clone() else {
            return Extraction::failure("Cargo.lock was not located before extraction.");
        };

        let lock_content = match safe_read_to_string(&lockfile_path) {
            Ok(content) => content,
            Err(e) => return Extraction::failure(e.to_string()),
        };

        let graph = match CargoLockExtractor::extract(&lockfile_path, &lock_content) {
            Ok(graph) => graph,
            Err(e) => return Extraction::failure(e.to_string()),
        };

        let (project_name, project_version) = match &self.cargo_toml {
            Some(manifest_path) => match safe_read_to_string(manifest_path) {
                Ok(content) => parse_project_name_version(&content),
                Err(e) => {
                    debug!(error = %e, "Skipping Cargo.toml project identity");
                    (None, None)
                }
            },
            None => (None, None),
        };

        debug!(
            nodes = graph.node_count(),
            lockfile = %lockfile_path.display(),
            "Extracted cargo dependency graph"
        );

        let logical_name = project_name.clone().unwrap_or_else(|| "cargo".to_string());
        let mut graphs = std::collections::BTreeMap::new();
        graphs.insert(logical_name, graph);
        Extraction::success_with_project(graphs, project_name, project_version)
    }
}

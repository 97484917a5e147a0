pub mod resolver;

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::adapters::outbound::filesystem::safe_read_to_string;
use crate::detectable::{Detectable, DetectableEnvironment, DetectableResult, Extraction};
use crate::graph::{DraftId, Forge, GraphBuilder, ResolvedId};
use crate::ports::outbound::{ExecutableRunner, FileFinder};
use crate::shared::Result;

use resolver::DpkgPackageResolver;

pub const PACKAGE_LIST_FILENAME: &str = "dpkg-packages.txt";

/// System-package adapter: resolves a list of package names against the
/// local dpkg status database.
///
/// The graph is flat. Every resolved package is a direct dependency of
/// ROOT; dpkg does not report inter-package edges here.
pub struct DpkgDetectable<F: FileFinder, R: ExecutableRunner> {
    environment: DetectableEnvironment,
    file_finder: F,
    runner: R,
    package_list: Option<PathBuf>,
}

impl<F: FileFinder, R: ExecutableRunner> DpkgDetectable<F, R> {
    pub fn new(environment: DetectableEnvironment, file_finder: F, runner: R) -> Self {
        Self {
            environment,
            file_finder,
            runner,
            package_list: None,
        }
    }
}

impl<F: FileFinder, R: ExecutableRunner> Detectable for DpkgDetectable<F, R> {
    fn name(&self) -> &'static str {
        "DPKG"
    }

    fn forge(&self) -> Forge {
        Forge::Dpkg
    }

    fn applicable(&mut self) -> DetectableResult {
        self.package_list = self
            .file_finder
            .find_file(self.environment.directory(), PACKAGE_LIST_FILENAME);
        if self.package_list.is_none() {
            return DetectableResult::FilesNotFound(vec![PACKAGE_LIST_FILENAME.to_string()]);
        }
        DetectableResult::Passed
    }

    fn extractable(&mut self) -> Result<DetectableResult> {
        let probe = self
            .runner
            .execute(self.environment.directory(), "dpkg", &["--version"]);
        match probe {
            Ok(_) => Ok(DetectableResult::Passed),
            Err(_) => Ok(DetectableResult::ExecutableNotFound("dpkg".to_string())),
        }
    }

    fn extract(&mut self) -> Extraction {
        let Some(list_path) = self.package_list.clone() else {
            return Extraction::failure("Package list was not located before extraction.");
        };

        let content = match safe_read_to_string(&list_path) {
            Ok(content) => content,
            Err(e) => return Extraction::failure(e.to_string()),
        };

        let mut builder = GraphBuilder::new();
        let mut resolved_count = 0usize;
        for name in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let Some(details) =
                DpkgPackageResolver::resolve(&self.runner, self.environment.directory(), name)
            else {
                continue;
            };
            let id = DraftId::from_name_and_range(&details.name, &details.version);
            builder.set_node_info(
                id.clone(),
                &*details.name,
                &*details.version,
                Some(ResolvedId::new(Forge::Dpkg, &*details.name, &*details.version)),
            );
            builder.add_child_to_root(id);
            resolved_count += 1;
        }

        debug!(
            packages = resolved_count,
            list = %list_path.display(),
            "Resolved installed dpkg packages"
        );

        // Every draft carries an identity from the resolver, so any miss
        // here is a programming error and aborts the extraction.
        match builder.build(|id, _info| Err(crate::graph::MissingIdError(id.clone()))) {
            Ok(graph) => {
                let mut graphs = BTreeMap::new();
                graphs.insert("dpkg".to_string(), graph);
                Extraction::success(graphs)
            }
            Err(e) => Extraction::failure(e.to_string()),
        }
    }
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::graph::{DependencyGraph, Forge};

/// One extracted dependency graph tied back to where it came from.
#[derive(Debug, Clone)]
pub struct CodeLocation {
    pub source_path: PathBuf,
    pub detectable_name: String,
    /// Grouping name the parser assigned (project name, Gradle
    /// configuration, lockfile stem).
    pub logical_name: String,
    pub forge: Forge,
    pub graph: DependencyGraph,
}

/// Turns a successful extraction's graphs into code locations.
pub struct CodeLocationConverter;

impl CodeLocationConverter {
    pub fn convert(
        source_path: &Path,
        detectable_name: &str,
        forge: Forge,
        graphs: BTreeMap<String, DependencyGraph>,
    ) -> Vec<CodeLocation> {
        graphs
            .into_iter()
            .map(|(logical_name, graph)| CodeLocation {
                source_path: source_path.to_path_buf(),
                detectable_name: detectable_name.to_string(),
                logical_name,
                forge,
                graph,
            })
            .collect()
    }
}

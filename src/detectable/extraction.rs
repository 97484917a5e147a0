use std::collections::BTreeMap;

use crate::graph::DependencyGraph;

/// Result of a detectable's extract phase.
///
/// A successful extraction carries one graph per logical grouping the
/// parser produced (e.g., one per Gradle sub-project) plus whatever
/// project identity the ecosystem's files declared. A failed extraction
/// carries only a description - never a partial graph.
#[derive(Debug, Clone)]
pub enum Extraction {
    Success {
        /// Dependency graphs keyed by logical name; becomes one code
        /// location each.
        graphs: BTreeMap<String, DependencyGraph>,
        project_name: Option<String>,
        project_version: Option<String>,
    },
    Failure {
        description: String,
    },
}

impl Extraction {
    pub fn success(graphs: BTreeMap<String, DependencyGraph>) -> Self {
        Extraction::Success {
            graphs,
            project_name: None,
            project_version: None,
        }
    }

    pub fn success_with_project(
        graphs: BTreeMap<String, DependencyGraph>,
        project_name: Option<String>,
        project_version: Option<String>,
    ) -> Self {
        Extraction::Success {
            graphs,
            project_name,
            project_version,
        }
    }

    /// A single graph under one logical name; the common case.
    pub fn single(logical_name: impl Into<String>, graph: DependencyGraph) -> Self {
        let mut graphs = BTreeMap::new();
        graphs.insert(logical_name.into(), graph);
        Extraction::success(graphs)
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Extraction::Failure {
            description: description.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Extraction::Success { .. })
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Extraction::Success { .. } => None,
            Extraction::Failure { description } => Some(description),
        }
    }
}

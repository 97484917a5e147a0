use std::path::PathBuf;

use tracing::{debug, warn};

use crate::graph::{DependencyGraph, DraftId, Forge, GraphBuilder, ResolvedId};
use crate::shared::Result;

use super::lockfile::YarnLock;
use super::package_json::PackageJson;

/// Merges the manifest's declared requirements with the lockfile's resolved
/// entries into one graph.
///
/// The two sources are independently ordered, so everything goes through
/// the lazy builder: manifest requirements become ROOT edges by draft key,
/// lockfile entries attach resolved identities to every alias they are
/// addressable by, and resolution happens once at the end.
pub struct YarnTransformer {
    lockfile_path: PathBuf,
}

impl YarnTransformer {
    pub fn new(lockfile_path: impl Into<PathBuf>) -> Self {
        Self {
            lockfile_path: lockfile_path.into(),
        }
    }

    pub fn transform(
        &self,
        package_json: &PackageJson,
        yarn_lock: &YarnLock,
        production_only: bool,
    ) -> Result<DependencyGraph> {
        let mut builder = GraphBuilder::new();

        for (name, range) in &package_json.dependencies {
            builder.add_child_to_root(DraftId::from_name_and_range(name, range));
        }
        if !production_only {
            for (name, range) in &package_json.dev_dependencies {
                builder.add_child_to_root(DraftId::from_name_and_range(name, range));
            }
        }

        for entry in &yarn_lock.entries {
            for entry_id in &entry.ids {
                let id = DraftId::from_name_and_range(&entry_id.name, &entry_id.version);
                builder.set_node_info(
                    id.clone(),
                    entry_id.name.clone(),
                    entry.version.clone(),
                    Some(ResolvedId::new(Forge::Npm, &entry_id.name, &entry.version)),
                );
                for dependency in &entry.dependencies {
                    let child = DraftId::from_name_and_range(&dependency.name, &dependency.version);
                    if production_only && dependency.optional {
                        debug!(dependency = %child, "Eliding optional dependency");
                    } else {
                        builder.add_child_with_parent(child, id.clone());
                    }
                }
            }
        }

        let lockfile_path = self.lockfile_path.clone();
        let graph = builder.build(move |id, _info| {
            // An incomplete lockfile is common (manual edits, partial
            // installs) and must not block analysis of everything that did
            // resolve: degrade to a synthetic identity and keep going.
            warn!(
                dependency = %id,
                lockfile = %lockfile_path.display(),
                "Missing yarn dependency; it is absent from the lockfile"
            );
            Ok(Self::synthesize_identity(id))
        })?;

        Ok(graph)
    }

    /// Best-effort identity from the raw draft string. It will not match
    /// any registry entry, but it keeps the node in the graph.
    fn synthesize_identity(id: &DraftId) -> ResolvedId {
        let (name, range) = id.name_and_range();
        ResolvedId::new(Forge::Npm, name, range.unwrap_or(""))
    }
}

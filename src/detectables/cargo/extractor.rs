use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::graph::{DependencyGraph, DraftId, Forge, GraphBuilder, ResolvedId};
use crate::shared::Result;

#[derive(Debug, Deserialize)]
struct CargoLock {
    #[serde(default)]
    package: Vec<CargoLockPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoLockPackage {
    name: String,
    version: String,
    /// Either `"name"` or `"name version"`; the version disambiguates when
    /// several versions of one crate coexist.
    #[serde(default)]
    dependencies: Vec<String>,
}

/// Builds a graph from Cargo.lock.
///
/// Dependency references inside the lockfile may omit the version, so
/// every package registers two aliases with the builder: the exact
/// `name@version` draft and the bare `name` draft. ROOT dependencies are
/// the packages nothing else in the lockfile depends on.
pub struct CargoLockExtractor;

impl CargoLockExtractor {
    pub fn extract(lockfile_path: &Path, content: &str) -> Result<DependencyGraph> {
        let lockfile: CargoLock = toml::from_str(content)
            .with_context(|| format!("Failed to parse {}", lockfile_path.display()))?;

        let mut builder = GraphBuilder::new();
        let mut referenced: BTreeSet<String> = BTreeSet::new();

        for package in &lockfile.package {
            let id = DraftId::from_name_and_range(&package.name, &package.version);
            let resolved = ResolvedId::new(Forge::Crates, &package.name, &package.version);
            builder.set_node_info(id.clone(), &*package.name, &*package.version, Some(resolved.clone()));
            // Bare-name alias for version-less dependency references.
            builder.set_node_info(DraftId::new(&*package.name), &*package.name, &*package.version, Some(resolved));

            for dependency in &package.dependencies {
                let child = Self::dependency_draft(dependency);
                let mut parts = dependency.split_whitespace();
                if let Some(name) = parts.next() {
                    referenced.insert(name.to_string());
                }
                builder.add_child_with_parent(child, id.clone());
            }
        }

        for package in &lockfile.package {
            if !referenced.contains(&package.name) {
                builder.add_child_to_root(DraftId::from_name_and_range(&package.name, &package.version));
            }
        }

        let path = lockfile_path.to_path_buf();
        let graph = builder.build(move |id, _info| {
            // A reference to a package the lockfile never lists: degrade to
            // a synthetic identity so the rest of the graph survives.
            warn!(
                dependency = %id,
                lockfile = %path.display(),
                "Missing cargo dependency; it is absent from the lockfile"
            );
            let (name, range) = id.name_and_range();
            Ok(ResolvedId::new(Forge::Crates, name, range.unwrap_or("")))
        })?;

        Ok(graph)
    }

    fn dependency_draft(dependency: &str) -> DraftId {
        let mut parts = dependency.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(name), Some(version)) => DraftId::from_name_and_range(name, version),
            _ => DraftId::new(dependency.trim()),
        }
    }
}

/// Read the project identity from Cargo.toml's `[package]` table.
pub fn parse_project_name_version(content: &str) -> (Option<String>, Option<String>) {
    let manifest: toml::Value = match toml::from_str(content) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!(error = %e, "Failed to parse Cargo.toml; continuing without project identity");
            return (None, None);
        }
    };
    let package = manifest.get("package");
    let name = package
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .map(String::from);
    let version = package
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str())
        .map(String::from);
    (name, version)
}

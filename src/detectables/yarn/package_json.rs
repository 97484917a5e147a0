use std::collections::BTreeMap;

use anyhow::Context;
use serde::Deserialize;

use crate::shared::Result;

/// The manifest half of the merge: direct declared requirements,
/// partitioned into runtime and development groups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageJson {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

pub fn parse_package_json(content: &str) -> Result<PackageJson> {
    serde_json::from_str(content).context("Failed to parse package.json")
}

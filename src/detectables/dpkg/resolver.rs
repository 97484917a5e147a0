use std::path::Path;

use tracing::{debug, warn};

use crate::ports::outbound::ExecutableRunner;

/// Details for one installed dpkg package, as reported by `dpkg -s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDetails {
    pub name: String,
    pub version: String,
    pub architecture: String,
}

/// Resolves installed-package details by querying the dpkg status database.
///
/// Resolution is best effort: an unreachable dpkg binary, an uninstalled
/// package, or incomplete status output all yield `None` with a log line,
/// never an error.
pub struct DpkgPackageResolver;

impl DpkgPackageResolver {
    pub fn resolve<R: ExecutableRunner>(
        runner: &R,
        working_dir: &Path,
        package_name: &str,
    ) -> Option<PackageDetails> {
        let output = match runner.execute(working_dir, "dpkg", &["-s", package_name]) {
            Ok(output) => output,
            Err(e) => {
                warn!(package = package_name, error = %e, "Error executing dpkg to get package info");
                return None;
            }
        };
        Self::parse_details(package_name, &output.stdout)
    }

    fn parse_details(package_name: &str, info_output: &str) -> Option<PackageDetails> {
        let mut version: Option<String> = None;
        let mut architecture: Option<String> = None;
        for line in info_output.lines() {
            if Self::uninstalled_status(package_name, line) {
                return None;
            }
            if version.is_none() {
                version = Self::labeled_value(package_name, line, "Version");
            }
            if architecture.is_none() {
                architecture = Self::labeled_value(package_name, line, "Architecture");
            }
        }
        match (version, architecture) {
            (Some(version), Some(architecture)) => Some(PackageDetails {
                name: package_name.to_string(),
                version,
                architecture,
            }),
            (version, architecture) => {
                warn!(
                    package = package_name,
                    version = ?version,
                    architecture = ?architecture,
                    "Unable to determine all details; this package will be omitted from the output"
                );
                None
            }
        }
    }

    fn labeled_value(package_name: &str, line: &str, target_label: &str) -> Option<String> {
        let (label, value) = line.split_once(':')?;
        if label.trim() != target_label {
            return None;
        }
        let value = value.trim();
        if value.is_empty() {
            warn!(package = package_name, label = target_label, "Field value is missing");
            return None;
        }
        Some(value.to_string())
    }

    fn uninstalled_status(package_name: &str, line: &str) -> bool {
        let Some((label, value)) = line.split_once(':') else {
            return false;
        };
        if label.trim() != "Status" {
            return false;
        }
        let value = value.trim();
        if value.is_empty() {
            warn!(package = package_name, "Missing value for Status field");
            return false;
        }
        if !value.contains("installed") {
            debug!(package = package_name, status = value, "Package is not installed");
            return true;
        }
        false
    }
}

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result as AnyhowResult};
use chrono::Utc;
use owo_colors::OwoColorize;
use serde::Serialize;
use uuid::Uuid;

use crate::adapters::outbound::events::EventRecorder;
use crate::graph::DependencyGraph;
use crate::ports::outbound::{Issue, Status, StatusType};
use crate::shared::ExitCode;

use super::code_location::CodeLocation;
use super::tool::ProjectInfo;

/// Serializable summary of one run: what was found, what failed and the
/// exit code the run will leave with.
#[derive(Debug, Serialize)]
pub struct RunReport {
    #[serde(rename = "runId")]
    run_id: String,
    timestamp: String,
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<ProjectReport>,
    statuses: Vec<Status>,
    issues: Vec<Issue>,
    #[serde(rename = "codeLocations")]
    code_locations: Vec<CodeLocationReport>,
    #[serde(rename = "exitCode")]
    exit_code: i32,
    #[serde(skip)]
    exit: ExitCode,
}

#[derive(Debug, Serialize)]
struct ProjectReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    detectable: String,
}

#[derive(Debug, Serialize)]
struct CodeLocationReport {
    detectable: String,
    #[serde(rename = "logicalName")]
    logical_name: String,
    forge: String,
    #[serde(rename = "sourcePath")]
    source_path: String,
    #[serde(rename = "nodeCount")]
    node_count: usize,
    #[serde(rename = "directDependencies")]
    direct_dependencies: Vec<String>,
    /// Child ids keyed by parent id, both in `forge:name:version` form.
    dependencies: BTreeMap<String, Vec<String>>,
}

impl CodeLocationReport {
    fn from_location(location: &CodeLocation) -> Self {
        Self {
            detectable: location.detectable_name.clone(),
            logical_name: location.logical_name.clone(),
            forge: location.forge.as_str().to_string(),
            source_path: location.source_path.display().to_string(),
            node_count: location.graph.node_count(),
            direct_dependencies: location
                .graph
                .direct_dependencies()
                .map(ToString::to_string)
                .collect(),
            dependencies: serialize_edges(&location.graph),
        }
    }
}

fn serialize_edges(graph: &DependencyGraph) -> BTreeMap<String, Vec<String>> {
    let mut edges = BTreeMap::new();
    for parent in graph.nodes() {
        let children: Vec<String> = graph.children_of(parent).map(ToString::to_string).collect();
        if !children.is_empty() {
            edges.insert(parent.to_string(), children);
        }
    }
    edges
}

impl RunReport {
    pub fn new(
        target: &Path,
        project: Option<&ProjectInfo>,
        code_locations: &[CodeLocation],
        events: &EventRecorder,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            target: target.display().to_string(),
            project: project.map(|p| ProjectReport {
                name: p.name.clone(),
                version: p.version.clone(),
                detectable: p.detectable_name.clone(),
            }),
            statuses: events.statuses(),
            issues: events.issues(),
            code_locations: code_locations.iter().map(CodeLocationReport::from_location).collect(),
            exit_code: events.worst_exit_code().as_i32(),
            exit: events.worst_exit_code(),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit
    }

    pub fn to_json(&self) -> AnyhowResult<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize run report")
    }

    /// Human-readable rendering for the terminal.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Dependency extraction results".bold());
        let _ = writeln!(out, "Target: {}", self.target);
        if let Some(project) = &self.project {
            let _ = writeln!(
                out,
                "Project: {} {} (via {})",
                project.name.as_deref().unwrap_or("unknown"),
                project.version.as_deref().unwrap_or(""),
                project.detectable
            );
        }

        if self.code_locations.is_empty() {
            let _ = writeln!(out, "\nNo dependency graphs were extracted.");
        } else {
            let _ = writeln!(out, "\nCode locations:");
            for location in &self.code_locations {
                let _ = writeln!(
                    out,
                    "  {} [{}] {}: {} packages, {} direct",
                    location.detectable,
                    location.forge,
                    location.logical_name,
                    location.node_count,
                    location.direct_dependencies.len()
                );
            }
        }

        if !self.statuses.is_empty() {
            let _ = writeln!(out, "\nDetectables:");
            for status in &self.statuses {
                let rendered = match status.status {
                    StatusType::Success => format!("{}", "SUCCESS".green()),
                    StatusType::Failure => format!("{}", "FAILURE".red()),
                };
                let _ = writeln!(out, "  {}: {}", status.detectable_name, rendered);
            }
        }

        for issue in &self.issues {
            for message in &issue.messages {
                let _ = writeln!(out, "{} {}", "issue:".yellow(), message);
            }
        }

        let _ = writeln!(out, "\nExit code: {}", self.exit_code);
        out
    }
}

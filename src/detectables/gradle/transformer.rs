use std::collections::BTreeMap;

use tracing::debug;

use crate::graph::{DependencyGraph, DraftId, GraphBuilder, MissingIdError};
use crate::shared::Result;

use super::model::GradleTreeNode;
use super::parser::GradleReportLineParser;

/// Transforms a parsed dependency report into one graph per sub-project.
///
/// Walks the node stream with a level stack: a coordinate at level L hangs
/// off the node at L-1 (or ROOT at level 0), a project line starts a fresh
/// graph section, and unrecognized lines occupy their level slot without
/// contributing an edge, so nothing beneath them mis-attaches to an older
/// ancestor.
#[derive(Debug, Default)]
pub struct GradleReportTransformer {
    parser: GradleReportLineParser,
}

impl GradleReportTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(
        &self,
        report: &str,
        root_project_name: &str,
    ) -> Result<BTreeMap<String, DependencyGraph>> {
        let mut graphs = BTreeMap::new();
        let mut current_name = root_project_name.to_string();
        let mut builder = GraphBuilder::new();
        // One slot per level; None marks an unrecognized occupant.
        let mut node_stack: Vec<Option<DraftId>> = Vec::new();

        for line in report.lines() {
            match self.parser.parse_line(line) {
                GradleTreeNode::Project { name, .. } => {
                    Self::finish_section(&mut graphs, &current_name, builder)?;
                    builder = GraphBuilder::new();
                    node_stack.clear();
                    current_name = name;
                }
                GradleTreeNode::Gav { level, gav, replaced } => {
                    if let Some(replaced) = replaced {
                        debug!(
                            winner = %gav.to_resolved_id(),
                            losing_group = %replaced.group,
                            losing_artifact = %replaced.artifact,
                            "Conflict resolution replaced a coordinate"
                        );
                    }
                    let id = DraftId::new(gav.to_resolved_id().to_string());
                    builder.set_node_info(
                        id.clone(),
                        format!("{}:{}", gav.group, gav.artifact),
                        gav.version.clone(),
                        Some(gav.to_resolved_id()),
                    );

                    node_stack.truncate(level);
                    if level == 0 {
                        builder.add_child_to_root(id.clone());
                    } else {
                        match node_stack.get(level - 1) {
                            Some(Some(parent)) => {
                                builder.add_child_with_parent(id.clone(), parent.clone());
                            }
                            _ => {
                                // Parent slot is unrecognized or missing;
                                // attaching to a farther ancestor would lie.
                                debug!(line, "Skipping edge under an unrecognized parent");
                            }
                        }
                    }
                    node_stack.push(Some(id));
                }
                GradleTreeNode::Unknown { level } => {
                    node_stack.truncate(level);
                    node_stack.push(None);
                }
            }
        }

        Self::finish_section(&mut graphs, &current_name, builder)?;
        Ok(graphs)
    }

    /// Close out one sub-project section. Every inserted node carried a
    /// resolved identity, so an unresolved reference here means the report
    /// itself is corrupt: hard-fail the extraction.
    fn finish_section(
        graphs: &mut BTreeMap<String, DependencyGraph>,
        name: &str,
        builder: GraphBuilder,
    ) -> Result<()> {
        let graph = builder.build(|id, _info| Err(MissingIdError(id.clone())))?;
        if !graph.is_empty() {
            graphs.insert(name.to_string(), graph);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Forge, ResolvedId};

    fn maven(group: &str, artifact: &str, version: &str) -> ResolvedId {
        ResolvedId::from_gav(Forge::Maven, group, artifact, version)
    }

    #[test]
    fn test_single_root_dependency() {
        let report = "+--- com.foo:bar:1.0";
        let graphs = GradleReportTransformer::new().transform(report, "app").unwrap();

        let graph = &graphs["app"];
        assert_eq!(graph.node_count(), 1);
        let direct: Vec<_> = graph.direct_dependencies().collect();
        assert_eq!(direct, vec![&maven("com.foo", "bar", "1.0")]);
    }

    #[test]
    fn test_adjacent_levels_connect_parent_to_child() {
        let report = "\
+--- com.foo:parent:1.0
|    \\--- com.foo:child:2.0";
        let graphs = GradleReportTransformer::new().transform(report, "app").unwrap();

        let graph = &graphs["app"];
        let children: Vec<_> = graph.children_of(&maven("com.foo", "parent", "1.0")).collect();
        assert_eq!(children, vec![&maven("com.foo", "child", "2.0")]);
    }

    #[test]
    fn test_dedent_returns_to_ancestor() {
        let report = "\
+--- com.foo:a:1.0
|    +--- com.foo:b:1.0
|    |    \\--- com.foo:c:1.0
|    \\--- com.foo:d:1.0
\\--- com.foo:e:1.0";
        let graphs = GradleReportTransformer::new().transform(report, "app").unwrap();

        let graph = &graphs["app"];
        assert_eq!(graph.direct_dependency_count(), 2);
        let a_children: Vec<_> = graph.children_of(&maven("com.foo", "a", "1.0")).collect();
        assert_eq!(
            a_children,
            vec![&maven("com.foo", "b", "1.0"), &maven("com.foo", "d", "1.0")]
        );
        let b_children: Vec<_> = graph.children_of(&maven("com.foo", "b", "1.0")).collect();
        assert_eq!(b_children, vec![&maven("com.foo", "c", "1.0")]);
    }

    #[test]
    fn test_replacement_arrow_resolves_to_winning_version() {
        let report = "+--- com.foo:bar:1.0 -> 2.0";
        let graphs = GradleReportTransformer::new().transform(report, "app").unwrap();

        let graph = &graphs["app"];
        assert!(graph.contains(&maven("com.foo", "bar", "2.0")));
        assert!(!graph.contains(&maven("com.foo", "bar", "1.0")));
    }

    #[test]
    fn test_project_lines_split_sections() {
        let report = "\
+--- project :sub-a
+--- com.foo:only-root:1.0
+--- project :sub-b
+--- com.foo:in-b:1.0";
        let graphs = GradleReportTransformer::new().transform(report, "root").unwrap();

        // The first section is empty, so only the named sub-projects remain.
        assert_eq!(graphs.len(), 2);
        assert!(graphs[":sub-a"].contains(&maven("com.foo", "only-root", "1.0")));
        assert!(graphs[":sub-b"].contains(&maven("com.foo", "in-b", "1.0")));
    }

    #[test]
    fn test_unknown_line_consumes_level_slot() {
        // The unresolvable starter occupies level 0; its child must not be
        // attributed to ROOT or to any other node.
        let report = "\
+--- org.spring:unresolved-starter (n)
|    \\--- com.foo:orphan:1.0
\\--- com.foo:ok:1.0";
        let graphs = GradleReportTransformer::new().transform(report, "app").unwrap();

        let graph = &graphs["app"];
        assert!(graph.contains(&maven("com.foo", "orphan", "1.0")));
        assert!(graph.contains(&maven("com.foo", "ok", "1.0")));
        let direct: Vec<_> = graph.direct_dependencies().collect();
        assert_eq!(direct, vec![&maven("com.foo", "ok", "1.0")]);
    }

    #[test]
    fn test_header_noise_is_ignored() {
        let report = "\
> Task :dependencies

runtimeClasspath - Runtime classpath of source set 'main'.
+--- com.foo:bar:1.0";
        let graphs = GradleReportTransformer::new().transform(report, "app").unwrap();
        assert_eq!(graphs["app"].node_count(), 1);
    }
}

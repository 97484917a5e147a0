use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::identifier::{DraftId, ResolvedId};

/// The only error `build()` can raise itself: a draft reference that the
/// resolver declined to substitute. Raising it aborts the whole build;
/// there is no partial graph on this path.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("No resolved identity for dependency '{0}'")]
pub struct MissingIdError(pub DraftId);

/// Metadata attached to a draft before resolution. A draft may appear as an
/// edge endpoint with no info ever attached (pure forward reference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub name: String,
    pub version: String,
    pub resolved: Option<ResolvedId>,
}

/// Accumulates edges and per-node metadata keyed by [`DraftId`], then
/// resolves every draft to a [`ResolvedId`] in one pass at [`build`] time.
///
/// The builder is an arena of drafts plus a resolution table, not a live
/// graph: insertion order never matters, duplicate edges are no-ops, and
/// cycles in the edge set cannot cause non-termination because resolution
/// is a per-node table lookup, never a traversal.
///
/// One builder belongs to one extraction. It is mutated single-threaded
/// and consumed exactly once by [`build`].
///
/// [`build`]: GraphBuilder::build
#[derive(Debug, Default)]
pub struct GraphBuilder {
    root_children: BTreeSet<DraftId>,
    edges: BTreeSet<(DraftId, DraftId)>,
    infos: BTreeMap<DraftId, NodeInfo>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge from the ROOT sentinel to `child`. Never fails.
    pub fn add_child_to_root(&mut self, child: DraftId) {
        self.root_children.insert(child);
    }

    /// Insert a `parent -> child` edge. Never fails; duplicates are no-ops.
    pub fn add_child_with_parent(&mut self, child: DraftId, parent: DraftId) {
        self.edges.insert((parent, child));
    }

    /// Attach or overwrite metadata for a draft. Last write wins; safe to
    /// call before or after edges reference the id.
    pub fn set_node_info(
        &mut self,
        id: DraftId,
        name: impl Into<String>,
        version: impl Into<String>,
        resolved: Option<ResolvedId>,
    ) {
        self.infos.insert(
            id,
            NodeInfo {
                name: name.into(),
                version: version.into(),
                resolved,
            },
        );
    }

    /// Every draft that appears anywhere in the accumulated tables.
    fn all_draft_ids(&self) -> BTreeSet<DraftId> {
        let mut ids: BTreeSet<DraftId> = self.root_children.iter().cloned().collect();
        for (parent, child) in &self.edges {
            ids.insert(parent.clone());
            ids.insert(child.clone());
        }
        ids.extend(self.infos.keys().cloned());
        ids
    }

    /// Resolve every accumulated draft and assemble the final graph.
    ///
    /// For each draft: a known [`ResolvedId`] from its node info is used
    /// directly; otherwise `missing_id_resolver` is consulted. The resolver
    /// either returns a substitute identity (degrade gracefully, extraction
    /// still succeeds) or an error, which aborts the entire build.
    ///
    /// Resolution is a pure function of the accumulated tables, so feeding
    /// the same calls in any order yields an identical graph.
    pub fn build<F>(self, mut missing_id_resolver: F) -> Result<DependencyGraph, MissingIdError>
    where
        F: FnMut(&DraftId, Option<&NodeInfo>) -> Result<ResolvedId, MissingIdError>,
    {
        let mut table: BTreeMap<DraftId, ResolvedId> = BTreeMap::new();
        for id in self.all_draft_ids() {
            let info = self.infos.get(&id);
            let resolved = match info.and_then(|i| i.resolved.clone()) {
                Some(resolved) => resolved,
                None => missing_id_resolver(&id, info)?,
            };
            table.insert(id, resolved);
        }

        // The table is total over every referenced draft, so the lookups
        // below cannot fail; keep them defensive anyway.
        let mut graph = DependencyGraph::default();
        for id in table.values() {
            graph.nodes.insert(id.clone());
        }
        for child in &self.root_children {
            if let Some(resolved) = table.get(child) {
                graph.direct_dependencies.insert(resolved.clone());
            }
        }
        for (parent, child) in &self.edges {
            if let (Some(parent), Some(child)) = (table.get(parent), table.get(child)) {
                graph
                    .children
                    .entry(parent.clone())
                    .or_default()
                    .insert(child.clone());
            }
        }

        Ok(graph)
    }
}

/// The resolved dependency graph a parser hands to the pipeline.
///
/// Node identity is the canonical [`ResolvedId`]; drafts that resolved to
/// the same identity have already been collapsed into a single node with
/// merged edges. ROOT is implicit: its children are the
/// `direct_dependencies` set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: BTreeSet<ResolvedId>,
    direct_dependencies: BTreeSet<ResolvedId>,
    children: BTreeMap<ResolvedId, BTreeSet<ResolvedId>>,
}

impl DependencyGraph {
    pub fn nodes(&self) -> impl Iterator<Item = &ResolvedId> {
        self.nodes.iter()
    }

    pub fn direct_dependencies(&self) -> impl Iterator<Item = &ResolvedId> {
        self.direct_dependencies.iter()
    }

    pub fn children_of(&self, parent: &ResolvedId) -> impl Iterator<Item = &ResolvedId> {
        self.children.get(parent).into_iter().flatten()
    }

    pub fn contains(&self, id: &ResolvedId) -> bool {
        self.nodes.contains(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn direct_dependency_count(&self) -> usize {
        self.direct_dependencies.len()
    }

    pub fn edge_count(&self) -> usize {
        self.direct_dependencies.len() + self.children.values().map(BTreeSet::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Forge;

    fn hard_fail(id: &DraftId, _info: Option<&NodeInfo>) -> Result<ResolvedId, MissingIdError> {
        Err(MissingIdError(id.clone()))
    }

    fn degrade(id: &DraftId, _info: Option<&NodeInfo>) -> Result<ResolvedId, MissingIdError> {
        Ok(ResolvedId::new(Forge::Npm, id.as_str(), ""))
    }

    fn npm(name: &str, version: &str) -> ResolvedId {
        ResolvedId::new(Forge::Npm, name, version)
    }

    #[test]
    fn test_build_resolves_every_edge_endpoint() {
        let mut builder = GraphBuilder::new();
        builder.add_child_to_root(DraftId::new("a@1"));
        builder.add_child_with_parent(DraftId::new("b@2"), DraftId::new("a@1"));
        builder.set_node_info(DraftId::new("a@1"), "a", "1.0.0", Some(npm("a", "1.0.0")));
        builder.set_node_info(DraftId::new("b@2"), "b", "2.0.0", Some(npm("b", "2.0.0")));

        let graph = builder.build(hard_fail).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains(&npm("a", "1.0.0")));
        assert!(graph.contains(&npm("b", "2.0.0")));
        let children: Vec<_> = graph.children_of(&npm("a", "1.0.0")).collect();
        assert_eq!(children, vec![&npm("b", "2.0.0")]);
    }

    #[test]
    fn test_forward_reference_resolves_after_info_arrives() {
        let mut builder = GraphBuilder::new();
        // Edge first, metadata later: the normal lockfile ordering.
        builder.add_child_with_parent(DraftId::new("late@^1"), DraftId::new("root@1"));
        builder.set_node_info(DraftId::new("root@1"), "root", "1.0", Some(npm("root", "1.0")));
        builder.set_node_info(DraftId::new("late@^1"), "late", "1.4", Some(npm("late", "1.4")));

        let graph = builder.build(hard_fail).unwrap();
        assert!(graph.contains(&npm("late", "1.4")));
    }

    #[test]
    fn test_unresolved_reference_aborts_build_under_hard_fail() {
        let mut builder = GraphBuilder::new();
        builder.add_child_to_root(DraftId::new("ghost@^2"));

        let err = builder.build(hard_fail).unwrap_err();
        assert_eq!(err, MissingIdError(DraftId::new("ghost@^2")));
    }

    #[test]
    fn test_unresolved_reference_degrades_under_permissive_resolver() {
        let mut builder = GraphBuilder::new();
        builder.add_child_to_root(DraftId::new("ghost@^2"));

        let graph = builder.build(degrade).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.contains(&npm("ghost@^2", "")));
    }

    #[test]
    fn test_duplicate_edges_are_idempotent() {
        let mut builder = GraphBuilder::new();
        for _ in 0..3 {
            builder.add_child_to_root(DraftId::new("a@1"));
            builder.add_child_with_parent(DraftId::new("b@1"), DraftId::new("a@1"));
        }
        builder.set_node_info(DraftId::new("a@1"), "a", "1.0", Some(npm("a", "1.0")));
        builder.set_node_info(DraftId::new("b@1"), "b", "1.0", Some(npm("b", "1.0")));

        let graph = builder.build(hard_fail).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_last_node_info_write_wins() {
        let mut builder = GraphBuilder::new();
        builder.add_child_to_root(DraftId::new("a@1"));
        builder.set_node_info(DraftId::new("a@1"), "a", "0.9", Some(npm("a", "0.9")));
        builder.set_node_info(DraftId::new("a@1"), "a", "1.0", Some(npm("a", "1.0")));

        let graph = builder.build(hard_fail).unwrap();
        assert!(graph.contains(&npm("a", "1.0")));
        assert!(!graph.contains(&npm("a", "0.9")));
    }

    #[test]
    fn test_alias_merge_collapses_to_one_node() {
        // Two drafts pointing at the same resolved identity appear as one
        // node, and edges to either alias are attributed to it.
        let mut builder = GraphBuilder::new();
        builder.add_child_to_root(DraftId::new("lib@^1.0"));
        builder.add_child_with_parent(DraftId::new("lib@~1.2"), DraftId::new("app@1"));
        builder.set_node_info(DraftId::new("app@1"), "app", "1.0", Some(npm("app", "1.0")));
        builder.set_node_info(DraftId::new("lib@^1.0"), "lib", "1.2.0", Some(npm("lib", "1.2.0")));
        builder.set_node_info(DraftId::new("lib@~1.2"), "lib", "1.2.0", Some(npm("lib", "1.2.0")));

        let graph = builder.build(hard_fail).unwrap();
        assert_eq!(graph.node_count(), 2);
        let direct: Vec<_> = graph.direct_dependencies().collect();
        assert_eq!(direct, vec![&npm("lib", "1.2.0")]);
        let children: Vec<_> = graph.children_of(&npm("app", "1.0")).collect();
        assert_eq!(children, vec![&npm("lib", "1.2.0")]);
    }

    #[test]
    fn test_order_independence() {
        let a = DraftId::new("a@1");
        let b = DraftId::new("b@1");
        let c = DraftId::new("c@1");

        let mut forward = GraphBuilder::new();
        forward.add_child_to_root(a.clone());
        forward.add_child_with_parent(b.clone(), a.clone());
        forward.add_child_with_parent(c.clone(), b.clone());
        forward.set_node_info(a.clone(), "a", "1.0", Some(npm("a", "1.0")));
        forward.set_node_info(b.clone(), "b", "1.0", Some(npm("b", "1.0")));
        forward.set_node_info(c.clone(), "c", "1.0", Some(npm("c", "1.0")));

        let mut reversed = GraphBuilder::new();
        reversed.set_node_info(c.clone(), "c", "1.0", Some(npm("c", "1.0")));
        reversed.set_node_info(b.clone(), "b", "1.0", Some(npm("b", "1.0")));
        reversed.set_node_info(a.clone(), "a", "1.0", Some(npm("a", "1.0")));
        reversed.add_child_with_parent(c, b.clone());
        reversed.add_child_with_parent(b, a.clone());
        reversed.add_child_to_root(a);

        assert_eq!(forward.build(hard_fail).unwrap(), reversed.build(hard_fail).unwrap());
    }

    #[test]
    fn test_cycles_terminate() {
        let mut builder = GraphBuilder::new();
        builder.add_child_to_root(DraftId::new("a@1"));
        builder.add_child_with_parent(DraftId::new("b@1"), DraftId::new("a@1"));
        builder.add_child_with_parent(DraftId::new("a@1"), DraftId::new("b@1"));
        builder.set_node_info(DraftId::new("a@1"), "a", "1.0", Some(npm("a", "1.0")));
        builder.set_node_info(DraftId::new("b@1"), "b", "1.0", Some(npm("b", "1.0")));

        let graph = builder.build(hard_fail).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert!(graph.children_of(&npm("a", "1.0")).any(|c| c == &npm("b", "1.0")));
        assert!(graph.children_of(&npm("b", "1.0")).any(|c| c == &npm("a", "1.0")));
    }

    #[test]
    fn test_metadata_only_draft_becomes_a_node() {
        let mut builder = GraphBuilder::new();
        builder.set_node_info(DraftId::new("lone@1"), "lone", "1.0", Some(npm("lone", "1.0")));

        let graph = builder.build(hard_fail).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_empty_builder_builds_empty_graph() {
        let graph = GraphBuilder::new().build(hard_fail).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}

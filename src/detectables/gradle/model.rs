use crate::graph::{Forge, ResolvedId};

/// A fully-resolved group:artifact:version coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleGav {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl GradleGav {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    pub fn to_resolved_id(&self) -> ResolvedId {
        ResolvedId::from_gav(Forge::Maven, &self.group, &self.artifact, &self.version)
    }
}

/// The losing side of a `->` conflict-resolution marker. The version is
/// absent when only `group:artifact` preceded the arrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacedGradleGav {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

/// One parsed line of a Gradle dependency report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradleTreeNode {
    /// A sub-project anchor; starts a new graph section.
    Project { level: usize, name: String },
    /// A resolved coordinate, optionally recording what it replaced.
    Gav {
        level: usize,
        gav: GradleGav,
        replaced: Option<ReplacedGradleGav>,
    },
    /// A line that could not be split into a coordinate. Contributes no
    /// edge but still occupies its level slot.
    Unknown { level: usize },
}

impl GradleTreeNode {
    pub fn new_project(level: usize, name: impl Into<String>) -> Self {
        GradleTreeNode::Project {
            level,
            name: name.into(),
        }
    }

    pub fn new_gav(level: usize, gav: GradleGav) -> Self {
        GradleTreeNode::Gav {
            level,
            gav,
            replaced: None,
        }
    }

    pub fn new_gav_with_replacement(level: usize, gav: GradleGav, replaced: ReplacedGradleGav) -> Self {
        GradleTreeNode::Gav {
            level,
            gav,
            replaced: Some(replaced),
        }
    }

    pub fn new_unknown(level: usize) -> Self {
        GradleTreeNode::Unknown { level }
    }

    pub fn level(&self) -> usize {
        match self {
            GradleTreeNode::Project { level, .. }
            | GradleTreeNode::Gav { level, .. }
            | GradleTreeNode::Unknown { level } => *level,
        }
    }
}

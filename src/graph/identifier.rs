use serde::Serialize;
use std::fmt;

/// Pre-resolution dependency key.
///
/// A `DraftId` is whatever identity a parser can produce before the whole
/// input has been scanned, typically `name@versionRange`. Equality is
/// structural string equality: two drafts that spell the same dependency
/// differently (alias vs. canonical name) are distinct drafts and are only
/// merged once both resolve to the same [`ResolvedId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DraftId(String);

impl DraftId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The conventional `name@range` draft key used by lockfile parsers.
    pub fn from_name_and_range(name: &str, range: &str) -> Self {
        Self(format!("{}@{}", name, range))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a `name@range` draft back into its parts. Splits on the last
    /// `@` so scoped names like `@babel/core@^7.0` keep their scope.
    pub fn name_and_range(&self) -> (&str, Option<&str>) {
        match self.0.rfind('@') {
            Some(idx) if idx > 0 => (&self.0[..idx], Some(&self.0[idx + 1..])),
            _ => (self.0.as_str(), None),
        }
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry namespace a resolved identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Forge {
    Npm,
    Maven,
    Crates,
    Dpkg,
}

impl Forge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Forge::Npm => "npm",
            Forge::Maven => "maven",
            Forge::Crates => "crates",
            Forge::Dpkg => "dpkg",
        }
    }
}

impl fmt::Display for Forge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical post-resolution identity: `(forge, name, version)`.
///
/// Two drafts may resolve to the same `ResolvedId` (aliasing); the built
/// graph collapses them into one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResolvedId {
    pub forge: Forge,
    pub name: String,
    pub version: String,
}

impl ResolvedId {
    pub fn new(forge: Forge, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            forge,
            name: name.into(),
            version: version.into(),
        }
    }

    /// Maven-style coordinates: the node name carries both group and artifact.
    pub fn from_gav(forge: Forge, group: &str, artifact: &str, version: &str) -> Self {
        Self {
            forge,
            name: format!("{}:{}", group, artifact),
            version: version.to_string(),
        }
    }
}

impl fmt::Display for ResolvedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.forge, self.name, self.version)
    }
}

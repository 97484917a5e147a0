/// Dependency graph domain: identifiers, the lazy graph builder, and the
/// resolved graph it produces.
///
/// Parsers accumulate edges keyed by `DraftId` (whatever identity is known
/// at parse time, typically `name@range`) and resolve every draft to a
/// canonical `ResolvedId` in a single pass at build time. Forward references
/// are the normal case, not an error: a child may be referenced long before
/// the lockfile entry that names its real version has been seen.
pub mod builder;
pub mod identifier;

pub use builder::{DependencyGraph, GraphBuilder, MissingIdError, NodeInfo};
pub use identifier::{DraftId, Forge, ResolvedId};

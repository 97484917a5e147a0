//! depscout - dependency graph extraction for polyglot source trees
//!
//! This library discovers package-manager ecosystems in a target directory
//! and extracts normalized dependency graphs from their manifest and
//! lockfile pairs, following hexagonal architecture principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Graph** (`graph`): Identifiers, the lazy graph builder and the
//!   resolved dependency graph
//! - **Detectable** (`detectable`): The three-phase lifecycle contract every
//!   ecosystem adapter implements
//! - **Detectables** (`detectables`): Ecosystem adapters (Yarn, Gradle,
//!   Cargo, dpkg)
//! - **Pipeline** (`pipeline`): Run orchestration, code locations and the
//!   run report
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depscout::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let target = Path::new(".");
//! let environment = DetectableEnvironment::new(target.to_path_buf());
//!
//! let detectables: Vec<Box<dyn Detectable>> = vec![
//!     Box::new(YarnDetectable::new(environment.clone(), DirectoryFileFinder, false)),
//!     Box::new(CargoDetectable::new(environment, DirectoryFileFinder)),
//! ];
//!
//! let events = EventRecorder::new();
//! let run = run_detectables(detectables, target, &events);
//! let report = RunReport::new(target, run.project_info.as_ref(), &run.code_locations, &events);
//! println!("{}", report.to_text());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod detectable;
pub mod detectables;
pub mod graph;
pub mod pipeline;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::events::EventRecorder;
    pub use crate::adapters::outbound::filesystem::DirectoryFileFinder;
    pub use crate::adapters::outbound::process::SystemExecutableRunner;
    pub use crate::detectable::{
        Detectable, DetectableEnvironment, DetectableResult, DetectableState, Extraction,
    };
    pub use crate::detectables::cargo::CargoDetectable;
    pub use crate::detectables::dpkg::DpkgDetectable;
    pub use crate::detectables::gradle::GradleDetectable;
    pub use crate::detectables::yarn::YarnDetectable;
    pub use crate::graph::{
        DependencyGraph, DraftId, Forge, GraphBuilder, MissingIdError, ResolvedId,
    };
    pub use crate::pipeline::{run_detectables, CodeLocation, PipelineRun, RunReport};
    pub use crate::ports::outbound::{EventSink, ExecutableRunner, FileFinder};
    pub use crate::shared::Result;
}

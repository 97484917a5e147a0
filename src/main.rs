mod adapters;
mod cli;
mod config;
mod detectable;
mod detectables;
mod graph;
mod pipeline;
mod ports;
mod shared;

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use adapters::outbound::events::EventRecorder;
use adapters::outbound::filesystem::DirectoryFileFinder;
use adapters::outbound::process::SystemExecutableRunner;
use cli::{Args, ReportFormat};
use config::ConfigFile;
use detectable::{Detectable, DetectableEnvironment};
use detectables::cargo::CargoDetectable;
use detectables::dpkg::DpkgDetectable;
use detectables::gradle::GradleDetectable;
use detectables::yarn::YarnDetectable;
use pipeline::{run_detectables, RunReport};
use shared::error::DepscoutError;
use shared::{ExitCode, Result};

fn main() {
    let args = Args::parse_args();
    init_logging(&args);

    debug!("depscout v{} starting", env!("CARGO_PKG_VERSION"));

    match run(args) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_logging(args: &Args) {
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };

    let mut filter = EnvFilter::from_default_env();
    if env::var("RUST_LOG").is_err() {
        if let Ok(directive) = format!("depscout={}", level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let target_dir = args.path.as_deref().unwrap_or(".");
    let target_path = PathBuf::from(target_dir);
    validate_target_path(&target_path)?;

    let config = match &args.config {
        Some(explicit) => Some(config::load_config_from_path(Path::new(explicit))?),
        None => config::discover_config(&target_path)?,
    }
    .unwrap_or_default();

    let production = args.production || config.production.unwrap_or(false);
    let format = resolve_format(&args, &config)?;
    let excludes = resolve_excludes(&args, &config);

    let detectables = build_detectables(&target_path, production, &excludes);
    debug!(count = detectables.len(), "Registered detectables");

    let events = EventRecorder::new();
    let run = run_detectables(detectables, &target_path, &events);
    let report = RunReport::new(
        &target_path,
        run.project_info.as_ref(),
        &run.code_locations,
        &events,
    );

    let rendered = match format {
        ReportFormat::Text => report.to_text(),
        ReportFormat::Json => report.to_json()?,
    };

    match &args.output {
        Some(output_path) => {
            let path = PathBuf::from(output_path);
            std::fs::write(&path, &rendered).map_err(|e| DepscoutError::ReportWriteError {
                path: path.clone(),
                details: e.to_string(),
            })?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(report.exit_code())
}

fn resolve_format(args: &Args, config: &ConfigFile) -> Result<ReportFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    match &config.format {
        Some(value) => value
            .parse()
            .map_err(|e: String| anyhow::anyhow!("Invalid config: {}", e)),
        None => Ok(ReportFormat::Text),
    }
}

fn resolve_excludes(args: &Args, config: &ConfigFile) -> Vec<String> {
    let mut excludes: Vec<String> = args.exclude.iter().map(|e| e.to_uppercase()).collect();
    if let Some(config_excludes) = &config.exclude_detectables {
        excludes.extend(config_excludes.iter().map(|e| e.to_uppercase()));
    }
    excludes
}

fn build_detectables(
    target_path: &Path,
    production: bool,
    excludes: &[String],
) -> Vec<Box<dyn Detectable>> {
    let environment = DetectableEnvironment::new(target_path.to_path_buf());
    let mut detectables: Vec<Box<dyn Detectable>> = vec![
        Box::new(YarnDetectable::new(
            environment.clone(),
            DirectoryFileFinder,
            production,
        )),
        Box::new(GradleDetectable::new(environment.clone(), DirectoryFileFinder)),
        Box::new(CargoDetectable::new(environment.clone(), DirectoryFileFinder)),
        Box::new(DpkgDetectable::new(
            environment,
            DirectoryFileFinder,
            SystemExecutableRunner::new(),
        )),
    ];
    detectables.retain(|d| !excludes.contains(&d.name().to_string()));
    detectables
}

fn validate_target_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DepscoutError::InvalidTargetPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Symbolic links are rejected so the scan cannot be redirected
    // outside the intended directory.
    let metadata = std::fs::symlink_metadata(path).map_err(|e| DepscoutError::InvalidTargetPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(DepscoutError::SecurityError {
            path: path.to_path_buf(),
            reason: "Target path is a symbolic link".to_string(),
            hint: "Specify the real directory instead of a symbolic link".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(DepscoutError::InvalidTargetPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    let canonical_path = path
        .canonicalize()
        .map_err(|e| DepscoutError::InvalidTargetPath {
            path: path.to_path_buf(),
            reason: format!("Failed to canonicalize path: {}", e),
        })?;

    if !canonical_path.is_dir() {
        return Err(DepscoutError::InvalidTargetPath {
            path: path.to_path_buf(),
            reason: "Resolved path is not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}

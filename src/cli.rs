use clap::Parser;

/// How the run report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'text' or 'json'",
                s
            )),
        }
    }
}

/// Discover package-manager ecosystems and extract dependency graphs
#[derive(Parser, Debug)]
#[command(name = "depscout")]
#[command(version)]
#[command(about = "Discover package-manager ecosystems and extract dependency graphs", long_about = None)]
pub struct Args {
    /// Report format: text or json (defaults to text)
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Path to the target directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Only include production dependencies (skip devDependencies)
    #[arg(long)]
    pub production: bool,

    /// Exclude a detectable by name (e.g., YARN, GRADLE, CARGO, DPKG)
    /// Can be specified multiple times: -e YARN -e DPKG
    #[arg(short, long = "exclude", value_name = "DETECTABLE")]
    pub exclude: Vec<String>,

    /// Path to a config file (defaults to depscout.config.yml in the target)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

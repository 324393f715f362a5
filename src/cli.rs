use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ecoindex",
    version,
    about = "Composite environmental status indices for monitored facilities"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every facility in a measurement document
    Analyze(AnalyzeCommand),
    /// Report domains that lack data or failed to score
    Lint(LintCommand),
    /// Show which indicator slot each scorer assigns to a component name
    Classify(ClassifyCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// JSON document with facilities or bare measurements; `-` reads stdin
    pub input: PathBuf,
    /// Output format; falls back to `report.format` in config, then md
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    /// Restrict scoring to these domains (repeatable)
    #[arg(long = "domain", value_name = "DOMAIN")]
    pub domains: Vec<String>,
    /// Only report the facility with this id
    #[arg(long)]
    pub facility: Option<i64>,
    /// Pin "today" (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<String>,
}

#[derive(Args)]
pub struct LintCommand {
    pub input: PathBuf,
    #[arg(long = "domain", value_name = "DOMAIN")]
    pub domains: Vec<String>,
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<String>,
}

#[derive(Args)]
pub struct ClassifyCommand {
    pub component: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

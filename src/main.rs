mod cli;

use clap::Parser;
use ecoindex::clock::{self, Clock, FixedClock, SystemClock};
use ecoindex::config::{self, DEFAULT_CONFIG_FILE};
use ecoindex::domain::{self, Domain};
use ecoindex::error::EcoError;
use ecoindex::types::config::{EcoConfig, ReportFormatSetting};
use ecoindex::types::measurement::Facility;
use ecoindex::{analyze, input, report, telemetry};
use tracing::{debug, info};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

/// `--as-of` wins over `engine.as_of`; otherwise the local date.
fn resolve_clock(as_of: Option<&str>, loaded: Option<&EcoConfig>) -> Result<Box<dyn Clock>, EcoError> {
    if let Some(raw) = as_of {
        return Ok(Box::new(FixedClock(clock::parse_date(raw)?)));
    }
    match loaded.map(EcoConfig::as_of).transpose()?.flatten() {
        Some(date) => Ok(Box::new(FixedClock(date))),
        None => Ok(Box::new(SystemClock)),
    }
}

fn resolve_domains(requested: &[String], loaded: Option<&EcoConfig>) -> Result<Vec<Domain>, EcoError> {
    if !requested.is_empty() {
        return requested.iter().map(|name| name.parse()).collect();
    }
    match loaded {
        Some(cfg) => cfg.enabled_domains(),
        None => Ok(Domain::ALL.to_vec()),
    }
}

/// Facilities to score: all of them, or only those with data in explicitly
/// requested domains.
fn select_facilities<'a>(
    facilities: &'a [Facility],
    requested: &[String],
    domains: &[Domain],
) -> Vec<&'a Facility> {
    if requested.is_empty() {
        facilities.iter().collect()
    } else {
        domain::filter_facilities(facilities, domains)
    }
}

fn run() -> Result<i32, EcoError> {
    let cli = cli::Cli::parse();
    let root = std::env::current_dir()?;
    let loaded = config::load_config(&root)?;
    telemetry::init(&telemetry::resolve_level(
        cli.verbose,
        cli.quiet,
        loaded.as_ref().and_then(EcoConfig::log_level),
    ))?;
    let missing_config = loaded.is_none();
    if missing_config {
        debug!(root = %root.display(), "running without project config");
    }

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let facilities = input::load_input(&cmd.input)?;
            let clock = resolve_clock(cmd.as_of.as_deref(), loaded.as_ref())?;
            let domains = resolve_domains(&cmd.domains, loaded.as_ref())?;

            let mut selected = select_facilities(&facilities, &cmd.domains, &domains);
            if let Some(id) = cmd.facility {
                selected.retain(|facility| facility.id == id);
            }
            let analysis = analyze::analyze(&selected, clock.as_ref(), &domains);
            info!(
                facilities = analysis.facilities.len(),
                findings = analysis.findings.len(),
                "analysis complete"
            );

            let output_format = match (cmd.format, loaded.as_ref().and_then(EcoConfig::report_format)) {
                (Some(cli::ReportFormat::Json), _) | (None, Some(ReportFormatSetting::Json)) => {
                    report::OutputFormat::Json
                }
                _ => report::OutputFormat::Md,
            };
            let rendered = report::render(&analysis, output_format)?;
            println!("{rendered}");

            if missing_config && !cli.quiet {
                eprintln!("warning: no {} found in {}", DEFAULT_CONFIG_FILE, root.display());
            }

            if analysis.has_blocking() {
                Ok(exit_code::BLOCKING)
            } else if missing_config || !analysis.findings.is_empty() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Lint(cmd) => {
            let facilities = input::load_input(&cmd.input)?;
            let clock = resolve_clock(cmd.as_of.as_deref(), loaded.as_ref())?;
            let domains = resolve_domains(&cmd.domains, loaded.as_ref())?;

            let selected = select_facilities(&facilities, &cmd.domains, &domains);
            let findings = analyze::lint::lint_findings(&selected, clock.as_ref(), &domains);

            if findings.is_empty() {
                println!("lint: no findings");
                return Ok(exit_code::SUCCESS);
            }

            for finding in &findings {
                let level = if finding.blocking { "BLOCKING" } else { "WARN" };
                println!("[{}] {}: {}", level, finding.id, finding.title);
                println!("  {}", finding.body);
            }

            if findings.iter().any(|finding| finding.blocking) {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Classify(cmd) => {
            let slots = analyze::component_slots(&cmd.component);
            println!("component: {}", cmd.component);
            for entry in &slots {
                println!(
                    "  {:<10} {}",
                    entry.domain.as_str(),
                    entry.slot.as_deref().unwrap_or("(unrecognized)")
                );
            }

            if slots.iter().any(|entry| entry.slot.is_some()) {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}

use crate::error::EcoError;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LEVEL: &str = "warn";

/// Filter directive used when `RUST_LOG` is unset: `-v`/`-vv` win over the
/// configured level, and `--quiet` drops everything below errors.
pub fn resolve_level(verbose: u8, quiet: bool, configured: Option<&str>) -> String {
    match (verbose, quiet) {
        (_, true) => "error".to_string(),
        (0, false) => configured.unwrap_or(DEFAULT_LEVEL).to_string(),
        (1, false) => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Installs the global stderr subscriber; stdout stays reserved for reports.
pub fn init(level: &str) -> Result<(), EcoError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| EcoError::Telemetry(format!("invalid log filter '{level}': {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| EcoError::Telemetry(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        assert_eq!(resolve_level(0, false, None), "warn");
        assert_eq!(resolve_level(0, false, Some("ecoindex=debug")), "ecoindex=debug");
        assert_eq!(resolve_level(1, false, Some("error")), "info");
        assert_eq!(resolve_level(3, false, None), "debug");
        assert_eq!(resolve_level(0, true, Some("debug")), "error");
    }
}

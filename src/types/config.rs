use crate::domain::Domain;
use crate::error::EcoError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EcoConfig {
    pub engine: Option<EngineConfig>,
    pub domains: Option<DomainsConfig>,
    pub report: Option<ReportConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Pins "today" for seasonal and dated calculations.
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,
}

fn default_enabled() -> Vec<String> {
    Domain::ALL.iter().map(|d| d.as_str().to_string()).collect()
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormatSetting {
    Json,
    Md,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub format: Option<ReportFormatSetting>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `info` or `ecoindex=debug`.
    pub level: Option<String>,
}

impl EcoConfig {
    pub fn enabled_domains(&self) -> Result<Vec<Domain>, EcoError> {
        match &self.domains {
            Some(domains) => domains.enabled.iter().map(|name| name.parse()).collect(),
            None => Ok(Domain::ALL.to_vec()),
        }
    }

    pub fn as_of(&self) -> Result<Option<NaiveDate>, EcoError> {
        self.engine
            .as_ref()
            .and_then(|engine| engine.as_of.as_deref())
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                    EcoError::ConfigParse(format!("engine.as_of must be YYYY-MM-DD (found {raw})"))
                })
            })
            .transpose()
    }

    pub fn report_format(&self) -> Option<ReportFormatSetting> {
        self.report.as_ref().and_then(|report| report.format)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.as_deref())
    }

    pub fn validate(&self) -> Result<(), EcoError> {
        if let Some(domains) = &self.domains {
            if domains.enabled.is_empty() {
                return Err(EcoError::ConfigParse(
                    "domains.enabled cannot be empty".to_string(),
                ));
            }
            let mut seen = HashSet::new();
            for name in &domains.enabled {
                let domain: Domain = name.parse().map_err(|_| {
                    EcoError::ConfigParse(format!("domains.enabled contains unknown domain: {name}"))
                })?;
                if !seen.insert(domain) {
                    return Err(EcoError::ConfigParse(format!(
                        "domains.enabled contains duplicate domain: {name}"
                    )));
                }
            }
        }

        self.as_of()?;

        if let Some(level) = self.log_level() {
            if level.trim().is_empty() {
                return Err(EcoError::ConfigParse(
                    "logging.level must be a non-empty filter directive".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let cfg: EcoConfig = toml::from_str("").expect("empty config should parse");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.enabled_domains().expect("defaults"), Domain::ALL.to_vec());
        assert_eq!(cfg.as_of().expect("no date"), None);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[engine]
as_of = "2024-06-15"

[domains]
enabled = ["air", "soil", "energy"]

[report]
format = "json"

[logging]
level = "ecoindex=debug"
"#;

        let cfg: EcoConfig = toml::from_str(toml_str).expect("full config should parse");
        assert!(cfg.validate().is_ok());
        assert_eq!(
            cfg.enabled_domains().expect("domains should parse"),
            vec![Domain::Air, Domain::Ground, Domain::Energy]
        );
        assert_eq!(
            cfg.as_of().expect("date should parse"),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
        assert_eq!(cfg.report_format(), Some(ReportFormatSetting::Json));
        assert_eq!(cfg.log_level(), Some("ecoindex=debug"));
    }

    #[test]
    fn validate_rejects_unknown_domain() {
        let toml_str = r#"
[domains]
enabled = ["air", "noise"]
"#;
        let cfg: EcoConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("unknown domain: noise"));
    }

    #[test]
    fn validate_rejects_empty_and_duplicate_domains() {
        let empty: EcoConfig =
            toml::from_str("[domains]\nenabled = []\n").expect("config should parse");
        assert!(empty
            .validate()
            .expect_err("empty list should fail")
            .to_string()
            .contains("cannot be empty"));

        let duplicate: EcoConfig = toml::from_str("[domains]\nenabled = [\"ground\", \"soil\"]\n")
            .expect("config should parse");
        assert!(duplicate
            .validate()
            .expect_err("alias duplicate should fail")
            .to_string()
            .contains("duplicate domain"));
    }

    #[test]
    fn validate_rejects_malformed_as_of() {
        let cfg: EcoConfig =
            toml::from_str("[engine]\nas_of = \"15.06.2024\"\n").expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("engine.as_of"));
    }

    #[test]
    fn unknown_report_format_is_a_parse_error() {
        let parsed: Result<EcoConfig, _> = toml::from_str("[report]\nformat = \"sarif\"\n");
        assert!(parsed.is_err());
    }
}

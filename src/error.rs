use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoError {
    #[error("input file does not exist: {0}")]
    InputNotFound(String),

    #[error("input parse error: {0}")]
    InputParse(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("unknown domain: {0} (expected one of air, water, ground, radiation, economy, health, energy)")]
    UnknownDomain(String),

    #[error("invalid date {0}: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("telemetry init error: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EcoError>;

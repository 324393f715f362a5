pub mod analyze;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod report;
pub mod telemetry;
pub mod types;

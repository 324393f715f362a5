pub mod config;
pub mod indicator;
pub mod measurement;
pub mod report;

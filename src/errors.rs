use chrono::NaiveDate;
use log::SetLoggerError;
use log4rs::config::runtime::ConfigErrors;
use thiserror::Error;

/// Errors while managing configuration
///
#[derive(Error, Debug)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<SetLoggerError> for ConfigError {
    fn from(e: SetLoggerError) -> Self { ConfigError(e.to_string()) }
}
impl From<ConfigErrors> for ConfigError {
    fn from(e: ConfigErrors) -> Self { ConfigError(e.to_string()) }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}

/// Outcome of a selection that found nothing to summarize
///
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("SelectionError::EmptySelection: no forecast records for {0}")]
    EmptySelection(NaiveDate),
}

/// Errors while composing or writing the dashboard document
///
#[derive(Error, Debug)]
#[error("DashboardError: {0}")]
pub struct DashboardError(pub String);

impl From<std::io::Error> for DashboardError {
    fn from(e: std::io::Error) -> Self { DashboardError(e.to_string()) }
}
impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self { DashboardError(e.to_string()) }
}

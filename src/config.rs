use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::zone::Zone;

#[derive(Deserialize, Debug, Clone)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub long: f64,
}

#[derive(Deserialize, Debug)]
pub struct Files {
    pub forecast_csv: String,
    pub dashboard_out: String,
    pub secrets_file: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Time {
    pub zone: Zone,
}

#[derive(Deserialize, Debug)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub location: Location,
    pub files: Files,
    pub time: Time,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)
        .map_err(|e| ConfigError(format!("{}: {}", config_path, e)))?;
    let config: Config = toml::from_str(&toml)?;

    if !(-90.0..=90.0).contains(&config.location.lat) || !(-180.0..=180.0).contains(&config.location.long) {
        return Err(ConfigError::from("location lat/long out of range"));
    }

    Ok(config)
}

pub mod errors;

use std::env;
use std::fs;
use std::path::Path;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::config::Location;
use crate::manager_map::errors::MapError;

/// Environment variable (and secrets file key) holding the map tile access token
pub const TOKEN_KEY: &str = "MAPBOXAPI_KEY";

const MAP_STYLE: &str = "streets";
const MAP_ZOOM: u8 = 10;
const MARKER_SIZE: u8 = 14;

#[derive(Deserialize)]
struct Secrets {
    #[serde(rename = "MAPBOXAPI_KEY")]
    mapbox_api_key: Option<String>,
}

/// Everything the renderer needs to draw the location map
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MapPanel {
    pub name: String,
    pub lat: f64,
    pub long: f64,
    pub style: String,
    pub zoom: u8,
    pub marker_size: u8,
    pub access_token: String,
}

impl MapPanel {
    /// Returns a map panel centered on, and marking, the given location
    ///
    /// # Arguments
    ///
    /// * 'location' - the dashboard location
    /// * 'access_token' - map tile access token
    pub fn new(location: &Location, access_token: String) -> Self {
        Self {
            name: location.name.clone(),
            lat: location.lat,
            long: location.long,
            style: MAP_STYLE.to_string(),
            zoom: MAP_ZOOM,
            marker_size: MARKER_SIZE,
            access_token,
        }
    }
}

/// Reads the map tile access token from the process environment, falling back
/// to the secrets file if one is given
///
/// # Arguments
///
/// * 'secrets_file' - optional path to a toml secrets file
pub fn map_token(secrets_file: Option<&str>) -> Result<String, MapError> {
    resolve_token(env::var(TOKEN_KEY).ok(), secrets_file)
}

/// Picks the access token from an already read environment value or the secrets file
///
/// Blank values count as missing. A secrets file that doesn't exist is the same as
/// no secrets file, while one that exists but can't be parsed is an error.
///
/// # Arguments
///
/// * 'env_value' - value of the token environment variable, if set
/// * 'secrets_file' - optional path to a toml secrets file
pub fn resolve_token(env_value: Option<String>, secrets_file: Option<&str>) -> Result<String, MapError> {
    if let Some(token) = env_value.filter(|t| !t.trim().is_empty()) {
        debug!("map token taken from environment");
        return Ok(token);
    }

    if let Some(file) = secrets_file {
        let path = Path::new(file);
        if path.exists() {
            let toml = fs::read_to_string(path)?;
            let secrets: Secrets = toml::from_str(&toml)?;

            if let Some(token) = secrets.mapbox_api_key.filter(|t| !t.trim().is_empty()) {
                debug!("map token taken from {}", file);
                return Ok(token);
            }
        }
    }

    Err(MapError::MissingCredential)
}

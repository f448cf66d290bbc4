use std::fs;
use std::path::Path;
use log::info;
use serde::Serialize;
use crate::charts::{build_charts, Charts};
use crate::config::Location;
use crate::errors::DashboardError;
use crate::manager_map::errors::MapError;
use crate::manager_map::MapPanel;
use crate::models::forecast::ForecastRecord;
use crate::selector::DailySelection;

pub const NO_DATA_MESSAGE: &str = "No weather data available for today.";
pub const NO_MAP_TOKEN_MESSAGE: &str = "Mapbox API key is not available";
pub const MAP_TOKEN_MESSAGE: &str = "Mapbox API key is available";

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Overview {
    pub header: String,
    pub metrics: Vec<Metric>,
    pub coordinates: Coordinates,
}

/// The page model handed over to the renderer
///
/// On a day without data only the title and the no-data notice are set.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub notices: Vec<Notice>,
    pub overview: Option<Overview>,
    pub map: Option<MapPanel>,
    pub charts: Option<Charts>,
}

impl Dashboard {
    /// Returns the page for a run where the selected date had no records
    ///
    /// # Arguments
    ///
    /// * 'location' - the dashboard location
    pub fn no_data(location: &Location) -> Self {
        Self {
            title: title(location),
            notices: vec![Notice { level: NoticeLevel::Error, message: NO_DATA_MESSAGE.to_string() }],
            overview: None,
            map: None,
            charts: None,
        }
    }

    /// Returns the full page for a selected day
    ///
    /// A missing map token only drops the map panel, everything else is still composed.
    ///
    /// # Arguments
    ///
    /// * 'location' - the dashboard location
    /// * 'selection' - records and summary of the selected day
    /// * 'series' - the full forecast series, used for the charts
    /// * 'map_token' - outcome of the map token lookup
    pub fn new(location: &Location, selection: &DailySelection, series: &[ForecastRecord], map_token: Result<String, MapError>) -> Self {
        let (notice, map) = match map_token {
            Ok(token) => (
                Notice { level: NoticeLevel::Success, message: MAP_TOKEN_MESSAGE.to_string() },
                Some(MapPanel::new(location, token)),
            ),
            Err(MapError::MissingCredential) => (
                Notice { level: NoticeLevel::Warning, message: NO_MAP_TOKEN_MESSAGE.to_string() },
                None,
            ),
            Err(e) => (
                Notice { level: NoticeLevel::Warning, message: format!("{}: {}", NO_MAP_TOKEN_MESSAGE, e) },
                None,
            ),
        };

        Self {
            title: title(location),
            notices: vec![notice],
            overview: Some(overview(location, selection)),
            map,
            charts: Some(build_charts(series)),
        }
    }
}

fn title(location: &Location) -> String {
    format!("{} Weather Forecast Dashboard", location.name)
}

/// Builds the overview header and the metric row for the selected day
///
/// # Arguments
///
/// * 'location' - the dashboard location
/// * 'selection' - records and summary of the selected day
fn overview(location: &Location, selection: &DailySelection) -> Overview {
    let summary = &selection.summary;
    let metric = |label: &str, value: String| Metric { label: label.to_string(), value };

    Overview {
        header: format!("Weather Overview for {}", selection.date.format("%d %b %Y").to_string().to_uppercase()),
        metrics: vec![
            metric("Max Temperature", format!("{:.2}°C", summary.max_temp)),
            metric("Min Temperature", format!("{:.2}°C", summary.min_temp)),
            // Upstream labels the summed probability as a depth, kept as is
            metric("Total Precipitation", format!("{:.2} mm", summary.total_precipitation)),
            metric("Max Wind Speed", format!("{:.2} m/s", summary.max_wind)),
            metric("Sunrise", summary.sunrise_local.clone()),
            metric("Sunset", summary.sunset_local.clone()),
        ],
        coordinates: Coordinates { lat: location.lat, long: location.long },
    }
}

/// Writes the dashboard as pretty printed json
///
/// # Arguments
///
/// * 'dashboard' - the page model to write
/// * 'path' - output file path
pub fn write_dashboard<P: AsRef<Path>>(dashboard: &Dashboard, path: P) -> Result<(), DashboardError> {
    let json = serde_json::to_string_pretty(dashboard)?;
    fs::write(path.as_ref(), json)?;

    info!("dashboard written to {}", path.as_ref().display());
    Ok(())
}

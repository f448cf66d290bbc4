use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One row of the forecast time series with all timestamps resolved into the configured zone
///
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRecord {
    pub forecast_time: DateTime<FixedOffset>,
    pub temperature: f64,
    pub feels_like_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub humidity: f64,
    pub cloudiness: f64,
    pub precipitation_probability: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
}

impl ForecastRecord {
    /// Day and month label of the forecast time, e.g. "22 Aug"
    ///
    pub fn date_label(&self) -> String {
        self.forecast_time.format("%d %b").to_string()
    }
}

/// Summary metrics for the records of one calendar date
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub max_temp: f64,
    pub min_temp: f64,
    pub total_precipitation: f64,
    pub max_wind: f64,
    pub sunrise_local: String,
    pub sunset_local: String,
}

pub mod errors;

use std::fs::File;
use std::io::Read;
use std::path::Path;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use log::{debug, info};
use serde::Deserialize;
use crate::manager_forecast::errors::ForecastError;
use crate::models::forecast::ForecastRecord;
use crate::zone::Zone;

/// Columns that must be present in the forecast file header
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "forecast_time",
    "temperature",
    "feels_like_temperature",
    "max_temperature",
    "min_temperature",
    "humidity",
    "cloudiness",
    "precipitation_probability",
    "wind_speed",
    "pressure",
    "sunrise",
    "sunset",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Row as it comes out of the file, timestamps still unresolved
#[derive(Deserialize)]
struct RawRow {
    forecast_time: String,
    temperature: f64,
    feels_like_temperature: f64,
    max_temperature: f64,
    min_temperature: f64,
    humidity: f64,
    cloudiness: f64,
    precipitation_probability: f64,
    wind_speed: f64,
    pressure: f64,
    sunrise: String,
    sunset: String,
}

/// Loads the forecast file and returns its records in file order
///
/// # Arguments
///
/// * 'path' - path to the forecast csv file
/// * 'zone' - the zone to resolve timestamps into
pub fn load_forecast<P: AsRef<Path>>(path: P, zone: Zone) -> Result<Vec<ForecastRecord>, ForecastError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ForecastError::File(format!("{}: {}", path.display(), e)))?;

    let records = load_forecast_from_reader(file, zone)?;
    info!("loaded {} forecast records from {}", records.len(), path.display());

    Ok(records)
}

/// Reads forecast records from any reader holding csv data with a header line
///
/// The header is checked against the required columns before any row is read, so a
/// file with a missing column fails as a whole rather than on some later lookup.
/// Extra columns, such as the `date` convenience column, are ignored.
///
/// # Arguments
///
/// * 'reader' - reader with csv content
/// * 'zone' - the zone to resolve timestamps into
pub fn load_forecast_from_reader<R: Read>(reader: R, zone: Zone) -> Result<Vec<ForecastRecord>, ForecastError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == **c))
        .copied()
        .collect::<Vec<&str>>();
    if !missing.is_empty() {
        return Err(ForecastError::Schema(format!("missing column(s): {}", missing.join(", "))));
    }

    let mut records: Vec<ForecastRecord> = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawRow = row
            .deserialize(Some(&headers))
            .map_err(|e| ForecastError::Row { line, message: e.to_string() })?;

        records.push(resolve_row(raw, zone, line)?);
    }
    debug!("resolved {} rows in zone {}", records.len(), zone);

    Ok(records)
}

/// Turns a raw row into a record by resolving its timestamps and checking that
/// every reading is a finite number
///
/// # Arguments
///
/// * 'raw' - the raw row
/// * 'zone' - the zone to resolve timestamps into
/// * 'line' - line number in the file, for error reporting
fn resolve_row(raw: RawRow, zone: Zone, line: u64) -> Result<ForecastRecord, ForecastError> {
    let timestamp = |field: &str, value: &str| {
        parse_timestamp(value, zone).ok_or_else(|| ForecastError::Row {
            line,
            message: format!("unparseable {} timestamp: '{}'", field, value),
        })
    };

    // f64 parsing takes "NaN" and "inf", those are not valid readings
    let finite = |field: &str, value: f64| {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ForecastError::Row { line, message: format!("non-finite {}: {}", field, value) })
        }
    };

    Ok(ForecastRecord {
        forecast_time: timestamp("forecast_time", &raw.forecast_time)?,
        temperature: finite("temperature", raw.temperature)?,
        feels_like_temperature: finite("feels_like_temperature", raw.feels_like_temperature)?,
        max_temperature: finite("max_temperature", raw.max_temperature)?,
        min_temperature: finite("min_temperature", raw.min_temperature)?,
        humidity: finite("humidity", raw.humidity)?,
        cloudiness: finite("cloudiness", raw.cloudiness)?,
        precipitation_probability: finite("precipitation_probability", raw.precipitation_probability)?,
        wind_speed: finite("wind_speed", raw.wind_speed)?,
        pressure: finite("pressure", raw.pressure)?,
        sunrise: timestamp("sunrise", &raw.sunrise)?,
        sunset: timestamp("sunset", &raw.sunset)?,
    })
}

/// Parses an ISO-like timestamp and resolves it into the given zone
///
/// Timestamps with an offset are converted, naive ones are taken as wall-clock time
/// in the zone and a bare date means midnight.
///
/// # Arguments
///
/// * 'value' - the timestamp string
/// * 'zone' - the zone to resolve into
pub fn parse_timestamp(value: &str, zone: Zone) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(zone.convert(dt));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(zone.convert(dt));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return zone.localize(&naive);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| zone.localize(&naive))
}

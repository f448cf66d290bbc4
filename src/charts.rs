use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use crate::models::forecast::ForecastRecord;

/// Weather variables that go into the correlation heatmap, in display order
pub const CORRELATION_COLUMNS: [(&str, fn(&ForecastRecord) -> f64); 7] = [
    ("temperature", |r| r.temperature),
    ("feels_like_temperature", |r| r.feels_like_temperature),
    ("humidity", |r| r.humidity),
    ("cloudiness", |r| r.cloudiness),
    ("precipitation_probability", |r| r.precipitation_probability),
    ("wind_speed", |r| r.wind_speed),
    ("pressure", |r| r.pressure),
];

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum XValue {
    Time(DateTime<FixedOffset>),
    Number(f64),
    Label(String),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DataItem {
    pub x: XValue,
    pub y: f64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Line,
    Scatter,
    Bar,
    Area,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub kind: TraceKind,
    pub secondary_axis: bool,
    pub points: Vec<DataItem>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2_label: Option<String>,
    pub traces: Vec<Trace>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

/// All chart data of the dashboard, ready for the renderer
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Charts {
    pub temperature_trend: Chart,
    pub humidity_vs_temperature: Chart,
    pub temperature_vs_feels_like: Chart,
    pub precipitation: Chart,
    pub wind_and_pressure: Chart,
    pub temperature_range: Chart,
    pub humidity: Chart,
    pub correlation: Heatmap,
}

impl Chart {
    fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            y2_label: None,
            traces: Vec::new(),
        }
    }

    fn with_y2_label(mut self, y2_label: &str) -> Self {
        self.y2_label = Some(y2_label.to_string());
        self
    }

    fn with_trace(mut self, name: &str, kind: TraceKind, points: Vec<DataItem>) -> Self {
        self.traces.push(Trace { name: name.to_string(), kind, secondary_axis: false, points });
        self
    }

    fn with_secondary_trace(mut self, name: &str, kind: TraceKind, points: Vec<DataItem>) -> Self {
        self.traces.push(Trace { name: name.to_string(), kind, secondary_axis: true, points });
        self
    }
}

/// Builds the data of every dashboard chart from the full forecast series
///
/// The charts cover the whole series, not only the selected day, and keep the series order.
///
/// # Arguments
///
/// * 'series' - the full forecast series
pub fn build_charts(series: &[ForecastRecord]) -> Charts {
    let by_time = |f: fn(&ForecastRecord) -> f64| {
        series.iter().map(|r| DataItem { x: XValue::Time(r.forecast_time), y: f(r) }).collect::<Vec<DataItem>>()
    };
    let by_date = |f: fn(&ForecastRecord) -> f64| {
        series.iter().map(|r| DataItem { x: XValue::Label(r.date_label()), y: f(r) }).collect::<Vec<DataItem>>()
    };

    let scatter = series
        .iter()
        .map(|r| DataItem { x: XValue::Number(r.temperature), y: r.humidity })
        .collect::<Vec<DataItem>>();

    Charts {
        temperature_trend: Chart::new("Temperature Forecasts", "Time", "Temperature (°C)")
            .with_trace("Temperature", TraceKind::Line, by_time(|r| r.temperature)),
        humidity_vs_temperature: Chart::new("Humidity vs. Temperature Forecasts", "Temperature (°C)", "Humidity (%)")
            .with_trace("Humidity", TraceKind::Scatter, scatter),
        temperature_vs_feels_like: Chart::new("Temperature and Feels Like Forecasts", "Date", "Temperature (°C)")
            .with_trace("Temperature", TraceKind::Bar, by_date(|r| r.temperature))
            .with_trace("Feels Like", TraceKind::Bar, by_date(|r| r.feels_like_temperature)),
        precipitation: Chart::new("Precipitation Probability Forecasts", "Date", "Precipitation Probability (%)")
            .with_trace("Precipitation Probability", TraceKind::Bar, by_date(|r| r.precipitation_probability * 100.0)),
        wind_and_pressure: Chart::new("Wind Speed and Pressure Forecasts", "Date", "Wind Speed (m/s)")
            .with_y2_label("Pressure (hPa)")
            .with_trace("Wind Speed", TraceKind::Bar, by_date(|r| r.wind_speed))
            .with_secondary_trace("Pressure", TraceKind::Line, by_date(|r| r.pressure)),
        temperature_range: Chart::new("Today & 5-Day Temperature Forecast", "Date", "Temperature (°C)")
            .with_trace("Max Temp", TraceKind::Area, by_date(|r| r.max_temperature))
            .with_trace("Min Temp", TraceKind::Area, by_date(|r| r.min_temperature)),
        humidity: Chart::new("Today & A 5-Day Humidity Forecast", "Date", "Humidity (%)")
            .with_trace("Humidity", TraceKind::Area, by_date(|r| r.humidity)),
        correlation: Heatmap {
            title: "Correlation Heatmap of Weather Variables".to_string(),
            labels: CORRELATION_COLUMNS.iter().map(|(name, _)| name.to_string()).collect(),
            values: correlation_matrix(series),
        },
    }
}

/// Calculates the pairwise Pearson correlation between the heatmap columns,
/// rounded to two decimals
///
/// A pair where either column has no variance, or with fewer than two records,
/// has no defined correlation and is None.
///
/// # Arguments
///
/// * 'series' - the forecast series
pub fn correlation_matrix(series: &[ForecastRecord]) -> Vec<Vec<Option<f64>>> {
    let columns = CORRELATION_COLUMNS
        .iter()
        .map(|(_, value)| series.iter().map(|r| value(r)).collect::<Vec<f64>>())
        .collect::<Vec<Vec<f64>>>();

    columns
        .iter()
        .map(|a| columns.iter().map(|b| pearson(a, b).map(round2)).collect())
        .collect()
}

/// Rounds to two decimals with ties going to the even neighbour
///
/// # Arguments
///
/// * 'value' - the value to round
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Pearson correlation coefficient of two equally long samples
///
/// # Arguments
///
/// * 'a' - first sample
/// * 'b' - second sample
fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < 2 {
        return None;
    }

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b.iter()) {
        cov += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a).powi(2);
        var_b += (y - mean_b).powi(2);
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }

    // Clamp away rounding drift just outside [-1, 1]
    Some((cov / (var_a * var_b).sqrt()).clamp(-1.0, 1.0))
}

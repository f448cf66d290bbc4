use chrono::{DateTime, FixedOffset, NaiveDate};
use crate::errors::SelectionError;
use crate::models::forecast::{DailySummary, ForecastRecord};
use crate::zone::Zone;

/// Records of one calendar date together with their summary
///
#[derive(Debug, Clone, PartialEq)]
pub struct DailySelection {
    pub date: NaiveDate,
    pub records: Vec<ForecastRecord>,
    pub summary: DailySummary,
}

/// Picks out the forecast records for a given date and summarizes them
///
/// "Today" is always the current date in the selector's zone, and records are matched on
/// the date of their forecast time in that same zone.
pub struct DailyForecastSelector {
    zone: Zone,
}

impl DailyForecastSelector {
    /// Returns a new selector working in the given zone
    ///
    /// # Arguments
    ///
    /// * 'zone' - zone used for calendar date comparisons
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }

    /// Selects the records for the reference date, or for today if none is given,
    /// and computes their summary
    ///
    /// Sunrise and sunset are taken from the first matching record in series order,
    /// they are assumed to be the same for all records of a day.
    ///
    /// # Arguments
    ///
    /// * 'series' - full forecast series
    /// * 'reference_date' - the date to select, defaults to the current date in the zone
    pub fn select_today(&self, series: &[ForecastRecord], reference_date: Option<NaiveDate>) -> Result<DailySelection, SelectionError> {
        let date = reference_date.unwrap_or_else(|| self.zone.today());

        let records = series
            .iter()
            .filter(|r| self.zone.convert(r.forecast_time).date_naive() == date)
            .cloned()
            .collect::<Vec<ForecastRecord>>();

        let first = records.first().ok_or(SelectionError::EmptySelection(date))?;

        let summary = DailySummary {
            max_temp: records.iter().map(|r| r.temperature).fold(f64::NEG_INFINITY, f64::max),
            min_temp: records.iter().map(|r| r.temperature).fold(f64::INFINITY, f64::min),
            total_precipitation: records.iter().map(|r| r.precipitation_probability).sum(),
            max_wind: records.iter().map(|r| r.wind_speed).fold(f64::NEG_INFINITY, f64::max),
            sunrise_local: format_clock(&self.zone.convert(first.sunrise)),
            sunset_local: format_clock(&self.zone.convert(first.sunset)),
        };

        Ok(DailySelection { date, records, summary })
    }
}

/// Formats the time of day on a 12-hour clock, e.g. "06:45 PM"
///
/// # Arguments
///
/// * 'date_time' - the date time to format
pub fn format_clock(date_time: &DateTime<FixedOffset>) -> String {
    date_time.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager_forecast::parse_timestamp;

    fn record(time: &str, temperature: f64, wind_speed: f64, precipitation: f64) -> ForecastRecord {
        let date = &time[0..10];
        ForecastRecord {
            forecast_time: parse_timestamp(time, Zone::Utc).unwrap(),
            temperature,
            feels_like_temperature: temperature + 1.0,
            max_temperature: temperature + 2.0,
            min_temperature: temperature - 2.0,
            humidity: 70.0,
            cloudiness: 40.0,
            precipitation_probability: precipitation,
            wind_speed,
            pressure: 1012.0,
            sunrise: parse_timestamp(&format!("{}T06:12:00", date), Zone::Utc).unwrap(),
            sunset: parse_timestamp(&format!("{}T18:45:00", date), Zone::Utc).unwrap(),
        }
    }

    fn series() -> Vec<ForecastRecord> {
        vec![
            record("2024-08-22T09:00:00", 24.0, 3.1, 0.2),
            record("2024-08-22T15:00:00", 31.5, 5.4, 0.1),
            record("2024-08-23T09:00:00", 20.0, 1.0, 0.9),
        ]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_select_reference_date() {
        let selector = DailyForecastSelector::new(Zone::Utc);
        let selection = selector.select_today(&series(), Some(date(2024, 8, 22))).unwrap();

        assert_eq!(selection.date, date(2024, 8, 22));
        assert_eq!(selection.records.len(), 2);
        assert_eq!(selection.summary.max_temp, 31.5);
        assert_eq!(selection.summary.min_temp, 24.0);
        assert_eq!(selection.summary.max_wind, 5.4);
        assert!((selection.summary.total_precipitation - 0.3).abs() < 1e-9);
        assert_eq!(selection.summary.sunrise_local, "06:12 AM");
        assert_eq!(selection.summary.sunset_local, "06:45 PM");
    }

    #[test]
    fn test_adjacent_days_do_not_contribute() {
        let selector = DailyForecastSelector::new(Zone::Utc);
        let selection = selector.select_today(&series(), Some(date(2024, 8, 23))).unwrap();

        assert_eq!(selection.records.len(), 1);
        assert_eq!(selection.summary.total_precipitation, 0.9);
        assert_eq!(selection.summary.max_temp, 20.0);
        assert_eq!(selection.summary.min_temp, 20.0);
    }

    #[test]
    fn test_min_never_above_max() {
        let selector = DailyForecastSelector::new(Zone::Utc);
        for d in [date(2024, 8, 22), date(2024, 8, 23)] {
            let summary = selector.select_today(&series(), Some(d)).unwrap().summary;
            assert!(summary.min_temp <= summary.max_temp);
            assert!(summary.max_temp.is_finite() && summary.min_temp.is_finite());
            assert!(summary.max_wind.is_finite() && summary.total_precipitation.is_finite());
        }
    }

    #[test]
    fn test_loaded_series_gives_finite_summary() {
        use crate::manager_forecast::load_forecast_from_reader;
        use std::io::Cursor;

        let header = "forecast_time,temperature,feels_like_temperature,max_temperature,min_temperature,humidity,cloudiness,precipitation_probability,wind_speed,pressure,sunrise,sunset";
        let good = "2024-08-22 09:00:00,24.0,25.1,26.0,23.0,80,75,0.2,3.1,1012,2024-08-22 06:12:00,2024-08-22 18:45:00";
        let bad = "2024-08-22 12:00:00,NaN,25.1,26.0,23.0,80,75,inf,NaN,1012,2024-08-22 06:12:00,2024-08-22 18:45:00";

        // Non-finite readings never make it into a series
        assert!(load_forecast_from_reader(Cursor::new(format!("{}\n{}\n{}", header, good, bad)), Zone::Utc).is_err());

        let records = load_forecast_from_reader(Cursor::new(format!("{}\n{}", header, good)), Zone::Utc).unwrap();
        let summary = DailyForecastSelector::new(Zone::Utc)
            .select_today(&records, Some(date(2024, 8, 22)))
            .unwrap()
            .summary;

        assert!(summary.max_temp.is_finite() && summary.min_temp.is_finite());
        assert!(summary.total_precipitation.is_finite() && summary.max_wind.is_finite());
        assert!(summary.min_temp <= summary.max_temp);
    }

    #[test]
    fn test_empty_selection() {
        let selector = DailyForecastSelector::new(Zone::Utc);

        assert_eq!(
            selector.select_today(&series(), Some(date(2024, 8, 24))),
            Err(SelectionError::EmptySelection(date(2024, 8, 24)))
        );
        assert_eq!(
            selector.select_today(&[], Some(date(2024, 8, 22))),
            Err(SelectionError::EmptySelection(date(2024, 8, 22)))
        );
    }

    #[test]
    fn test_first_record_sets_sun_times() {
        let mut records = series();
        records[1].sunrise = parse_timestamp("2024-08-22T05:59:00", Zone::Utc).unwrap();
        // Unsorted input, the later forecast comes first
        records.swap(0, 1);

        let selector = DailyForecastSelector::new(Zone::Utc);
        let selection = selector.select_today(&records, Some(date(2024, 8, 22))).unwrap();

        assert_eq!(selection.records[0].temperature, 31.5);
        assert_eq!(selection.summary.sunrise_local, "05:59 AM");
    }

    #[test]
    fn test_date_is_taken_in_selector_zone() {
        // 23:30 UTC on the 22nd is already the 23rd in +01:00
        let records = vec![record("2024-08-22T23:30:00", 22.0, 2.0, 0.4)];

        let utc = DailyForecastSelector::new(Zone::Utc);
        assert!(utc.select_today(&records, Some(date(2024, 8, 22))).is_ok());

        let lagos = DailyForecastSelector::new(Zone::Fixed(FixedOffset::east_opt(3600).unwrap()));
        assert!(lagos.select_today(&records, Some(date(2024, 8, 22))).is_err());
        let selection = lagos.select_today(&records, Some(date(2024, 8, 23))).unwrap();
        assert_eq!(selection.summary.sunrise_local, "07:12 AM");
    }

    #[test]
    fn test_defaults_to_today() {
        let today = Zone::Utc.today();
        let time = format!("{}T12:00:00", today.format("%Y-%m-%d"));
        let records = vec![record(&time, 18.0, 2.0, 0.0)];

        let selector = DailyForecastSelector::new(Zone::Utc);
        // A run straddling midnight may see the next date, both outcomes are well-defined
        match selector.select_today(&records, None) {
            Ok(selection) => assert_eq!(selection.date, today),
            Err(SelectionError::EmptySelection(d)) => assert!(d > today),
        }
    }

    #[test]
    fn test_selection_is_idempotent() {
        let selector = DailyForecastSelector::new(Zone::Utc);
        let records = series();

        let first = selector.select_today(&records, Some(date(2024, 8, 22)));
        let second = selector.select_today(&records, Some(date(2024, 8, 22)));
        assert_eq!(first, second);
        assert_eq!(records, series());
    }

    #[test]
    fn test_format_clock() {
        let morning = parse_timestamp("2024-08-22T06:12:00", Zone::Utc).unwrap();
        let evening = parse_timestamp("2024-08-22T18:45:00", Zone::Utc).unwrap();
        let noon = parse_timestamp("2024-08-22T12:05:00", Zone::Utc).unwrap();
        let midnight = parse_timestamp("2024-08-22T00:30:00", Zone::Utc).unwrap();

        assert_eq!(format_clock(&morning), "06:12 AM");
        assert_eq!(format_clock(&evening), "06:45 PM");
        assert_eq!(format_clock(&noon), "12:05 PM");
        assert_eq!(format_clock(&midnight), "12:30 AM");
    }
}

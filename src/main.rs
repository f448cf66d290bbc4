mod charts;
mod config;
mod dashboard;
mod errors;
mod logging;
mod manager_forecast;
mod manager_map;
mod models;
mod selector;
mod zone;

use std::env;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use crate::config::load_config;
use crate::dashboard::{write_dashboard, Dashboard};
use crate::logging::setup_logger;
use crate::manager_forecast::load_forecast;
use crate::manager_map::map_token;
use crate::selector::DailyForecastSelector;

fn main() -> Result<()> {
    let config_path = env::var("CONFIG_FILE").unwrap_or("config.toml".to_string());
    let config = load_config(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    setup_logger(&config.general).context("failed to set up logging")?;
    info!("weatherboard version: {}", env!("CARGO_PKG_VERSION"));
    info!("evaluating dates in zone {}", config.time.zone);

    // An explicit date on the command line replaces "today"
    let reference_date = match env::args().nth(1) {
        Some(arg) => Some(NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
            .with_context(|| format!("invalid reference date '{}', expected YYYY-MM-DD", arg))?),
        None => None,
    };

    let series = load_forecast(&config.files.forecast_csv, config.time.zone)
        .context("failed to load forecast")?;

    let selector = DailyForecastSelector::new(config.time.zone);
    let dashboard = match selector.select_today(&series, reference_date) {
        Ok(selection) => {
            info!("selected {} records for {}", selection.records.len(), selection.date);

            let token = map_token(config.files.secrets_file.as_deref());
            if let Err(e) = &token {
                warn!("skipping map: {}", e);
            }

            Dashboard::new(&config.location, &selection, &series, token)
        },
        Err(e) => {
            warn!("{}", e);
            Dashboard::no_data(&config.location)
        },
    };

    write_dashboard(&dashboard, &config.files.dashboard_out).context("failed to write dashboard")?;

    Ok(())
}

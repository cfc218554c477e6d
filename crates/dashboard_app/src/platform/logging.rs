//! Logger setup for the dashboard host.
//!
//! Log lines go to `./dashboard.log` in the current working directory unless
//! the config or `--log` sends them to the terminal.

use std::path::Path;

use dashboard_logging::LogDestination;

use super::config::{ConfigError, DashboardConfig};

const LOG_FILE: &str = "./dashboard.log";

pub(crate) fn initialize(
    config: &DashboardConfig,
    destination: Option<LogDestination>,
) -> Result<(), ConfigError> {
    let level = config.level_filter()?;
    dashboard_logging::initialize(
        destination.unwrap_or(config.log_destination),
        level,
        Path::new(LOG_FILE),
    );
    Ok(())
}

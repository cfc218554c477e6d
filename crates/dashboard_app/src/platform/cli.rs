use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dashboard_logging::LogDestination;

use super::config::DEFAULT_CONFIG_PATH;

#[derive(Debug, Parser)]
#[command(name = "dashboard")]
#[command(about = "Track, approve and reschedule simulation requests from the terminal")]
pub struct Cli {
    /// RON config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Backend base URL; overrides the config file
    #[arg(long)]
    pub base_url: Option<String>,

    /// Write the default config to --config and exit
    #[arg(long)]
    pub init_config: bool,

    /// Where log lines go; overrides the config file
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

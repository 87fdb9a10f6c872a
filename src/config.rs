use std::path::PathBuf;

use clap::Parser;

/// Command line of the dashboard. Every option can also come from the
/// environment; an explicit argument wins.
#[derive(Debug, Parser)]
#[command(author, version, about = "Interactive Titanic passenger dashboard")]
pub struct Cli {
    /// Passenger file (.csv, .json or .parquet)
    #[arg(env = "DASHBOARD_DATA", default_value = "train.csv")]
    pub data_path: PathBuf,

    /// Image painted behind the charts; optional
    #[arg(long, env = "DASHBOARD_BACKGROUND", default_value = "assets/titanic_background.jpg")]
    pub background: PathBuf,
}

/// Startup settings for the dashboard window.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Optional decoration; a missing file only affects styling.
    pub background_image: PathBuf,
    pub title: String,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("train.csv"),
            background_image: PathBuf::from("assets/titanic_background.jpg"),
            title: "Titanic Dataset Dashboard".to_string(),
            window_size: [1280.0, 860.0],
        }
    }
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_path: cli.data_path,
            background_image: cli.background,
            ..Self::default()
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Cli::parse().into()
    }
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::render::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::core::{ChartJob, ConfigProvider};
use crate::utils::error::{PlotError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range,
    validate_unique, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const MIN_IMAGE_SIDE: u32 = 64;
pub const MAX_IMAGE_SIDE: u32 = 8192;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rhm-plot")]
#[command(about = "Plot rhm insert and churn benchmark throughput")]
pub struct CliConfig {
    /// Number of keys inserted, shown in the insert chart's x label
    #[arg(allow_negative_numbers = true)]
    pub num_keys: i64,

    /// Number of churn operations, shown in the churn chart's x label
    #[arg(allow_negative_numbers = true)]
    pub num_churn_ops: i64,

    #[arg(long, help = "Directory holding rhm-insert.txt and rhm-churn.txt [default: .]")]
    pub input_dir: Option<String>,

    #[arg(long, help = "Directory the PNG files are written to [default: .]")]
    pub output_dir: Option<String>,

    #[arg(short, long, help = "TOML file describing the charts to draw")]
    pub config: Option<String>,

    #[arg(long, help = "Image width in pixels")]
    pub width: Option<u32>,

    #[arg(long, help = "Image height in pixels")]
    pub height: Option<u32>,

    #[arg(long, help = "Plot every x_k/y_k column pair instead of only x_0/y_0")]
    pub all_series: bool,

    #[arg(long, help = "Parse inputs and print the chart plan without writing images")]
    pub dry_run: bool,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(skip = ChartJob::defaults())]
    #[serde(skip, default = "ChartJob::defaults")]
    pub charts: Vec<ChartJob>,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_dir(&self) -> &str {
        self.input_dir.as_deref().unwrap_or(".")
    }

    fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(".")
    }

    fn charts(&self) -> &[ChartJob] {
        &self.charts
    }

    fn image_size(&self) -> (u32, u32) {
        (
            self.width.unwrap_or(DEFAULT_WIDTH),
            self.height.unwrap_or(DEFAULT_HEIGHT),
        )
    }

    fn all_series(&self) -> bool {
        self.all_series
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(feature = "cli")]
impl From<&CliConfig> for toml_config::Overrides {
    fn from(cli: &CliConfig) -> Self {
        Self {
            input_dir: cli.input_dir.clone(),
            output_dir: cli.output_dir.clone(),
            width: cli.width,
            height: cli.height,
            all_series: cli.all_series,
        }
    }
}

/// 所有配置來源共用的檢查
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_path("input_dir", config.input_dir())?;
    validate_path("output_dir", config.output_dir())?;

    let (width, height) = config.image_size();
    validate_range("render.width", width, MIN_IMAGE_SIDE, MAX_IMAGE_SIDE)?;
    validate_range("render.height", height, MIN_IMAGE_SIDE, MAX_IMAGE_SIDE)?;

    validate_chart_jobs(config.charts())
}

pub fn validate_chart_jobs(charts: &[ChartJob]) -> Result<()> {
    if charts.is_empty() {
        return Err(PlotError::MissingConfigError {
            field: "charts".to_string(),
        });
    }

    for chart in charts {
        validate_non_empty_string("charts.name", &chart.name)?;
        validate_path("charts.input", &chart.input)?;
        validate_path("charts.output", &chart.output)?;
        validate_file_extension("charts.output", &chart.output, &["png"])?;
        validate_non_empty_string("charts.x_column", &chart.x_column)?;
        validate_non_empty_string("charts.y_column", &chart.y_column)?;
    }

    validate_unique("charts.name", charts.iter().map(|c| c.name.as_str()))?;
    validate_unique("charts.output", charts.iter().map(|c| c.output.as_str()))
}

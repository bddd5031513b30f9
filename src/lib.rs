pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use config::toml_config::TomlConfig;
pub use core::{engine::PlotEngine, pipeline::PlotPipeline, render::BitmapRenderer};
pub use domain::model::{ChartJob, LabelValues};
pub use utils::error::{PlotError, Result};

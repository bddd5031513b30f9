pub mod chart;
pub mod engine;
pub mod pipeline;
pub mod render;
pub mod table;

pub use crate::domain::model::{Chart, ChartJob, ChartPlan, LabelValues, Series, Table};
pub use crate::domain::ports::{ChartRenderer, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

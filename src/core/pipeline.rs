use crate::core::chart::build_chart;
use crate::core::table::parse_table;
use crate::core::{
    Chart, ChartJob, ChartRenderer, ConfigProvider, LabelValues, Pipeline, Storage, Table,
};
use crate::utils::error::Result;
use std::path::Path;

pub struct PlotPipeline<S: Storage, R: ChartRenderer, C: ConfigProvider> {
    storage: S,
    renderer: R,
    config: C,
    labels: LabelValues,
}

impl<S: Storage, R: ChartRenderer, C: ConfigProvider> PlotPipeline<S, R, C> {
    pub fn new(storage: S, renderer: R, config: C, labels: LabelValues) -> Self {
        Self {
            storage,
            renderer,
            config,
            labels,
        }
    }

    pub fn labels(&self) -> &LabelValues {
        &self.labels
    }
}

impl<S: Storage, R: ChartRenderer, C: ConfigProvider> Pipeline for PlotPipeline<S, R, C> {
    fn jobs(&self) -> &[ChartJob] {
        self.config.charts()
    }

    fn extract(&self, job: &ChartJob) -> Result<Table> {
        tracing::debug!("Reading table: {}", job.input);
        let bytes = self.storage.read_file(&job.input)?;
        let content = String::from_utf8_lossy(&bytes);
        parse_table(&job.input, &content)
    }

    fn transform(&self, job: &ChartJob, table: Table) -> Result<Chart> {
        build_chart(job, &table, &self.labels, self.config.all_series())
    }

    fn load(&self, job: &ChartJob, chart: Chart) -> Result<String> {
        let path = self.storage.output_path(&job.output)?;
        self.renderer.render(&chart, &path)?;
        Ok(path.display().to_string())
    }

    fn output_location(&self, job: &ChartJob) -> String {
        Path::new(self.config.output_dir())
            .join(&job.output)
            .display()
            .to_string()
    }
}

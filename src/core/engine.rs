use crate::core::{ChartPlan, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct PlotEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> PlotEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 依序執行每張圖，遇到第一個錯誤即停止
    pub fn run(&self) -> Result<Vec<String>> {
        tracing::info!("Starting plot run ({} charts)", self.pipeline.jobs().len());
        self.monitor.log_stats("Start");

        let mut outputs = Vec::new();
        for job in self.pipeline.jobs() {
            tracing::info!("📈 [{}] {} -> {}", job.name, job.input, job.output);

            let table = self.pipeline.extract(job)?;
            tracing::info!("[{}] Loaded {} rows", job.name, table.len());
            self.monitor.log_stats(&format!("{} extract", job.name));

            let chart = self.pipeline.transform(job, table)?;
            tracing::debug!(
                "[{}] {} series, x {:?}, y {:?}",
                job.name,
                chart.series.len(),
                chart.x_range,
                chart.y_range
            );

            let output = self.pipeline.load(job, chart)?;
            tracing::info!("[{}] Saved {}", job.name, output);
            self.monitor.log_stats(&format!("{} render", job.name));

            outputs.push(output);
        }

        self.monitor.log_final_stats();
        Ok(outputs)
    }

    /// Dry run：只讀取與轉換，不輸出圖片
    pub fn plan(&self) -> Result<Vec<ChartPlan>> {
        self.pipeline
            .jobs()
            .iter()
            .map(|job| {
                let table = self.pipeline.extract(job)?;
                let chart = self.pipeline.transform(job, table)?;
                Ok(ChartPlan::new(job, self.pipeline.output_location(job), &chart))
            })
            .collect()
    }
}

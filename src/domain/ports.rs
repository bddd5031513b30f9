use crate::domain::model::{Chart, ChartJob, Table};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// 解析輸出路徑，必要時建立上層目錄
    fn output_path(&self, path: &str) -> Result<PathBuf>;
}

pub trait ConfigProvider {
    fn input_dir(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn charts(&self) -> &[ChartJob];
    fn image_size(&self) -> (u32, u32);
    fn all_series(&self) -> bool;
}

pub trait ChartRenderer {
    fn render(&self, chart: &Chart, path: &Path) -> Result<()>;
}

pub trait Pipeline {
    fn jobs(&self) -> &[ChartJob];
    fn extract(&self, job: &ChartJob) -> Result<Table>;
    fn transform(&self, job: &ChartJob, table: Table) -> Result<Chart>;
    fn load(&self, job: &ChartJob, chart: Chart) -> Result<String>;
    fn output_location(&self, job: &ChartJob) -> String;
}

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 從空白分隔文字檔讀入的表格，數值在取用欄位時才解析
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl Chart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn has_legend(&self) -> bool {
        self.series.len() > 1
    }
}

/// 一張圖的工作設定：一個輸入表格對應一張輸出圖片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartJob {
    pub name: String,
    pub input: String,
    pub output: String,
    #[serde(default = "default_x_column")]
    pub x_column: String,
    #[serde(default = "default_y_column")]
    pub y_column: String,
    pub x_label: String,
    pub y_label: String,
    pub title: Option<String>,
}

fn default_x_column() -> String {
    "x_0".to_string()
}

fn default_y_column() -> String {
    "y_0".to_string()
}

impl ChartJob {
    pub fn insert() -> Self {
        Self {
            name: "insert".to_string(),
            input: "rhm-insert.txt".to_string(),
            output: "plot_insert.png".to_string(),
            x_column: default_x_column(),
            y_column: default_y_column(),
            x_label: "percent of keys inserted ({num_keys})".to_string(),
            y_label: "throughput (num inserts per sec)".to_string(),
            title: None,
        }
    }

    pub fn churn() -> Self {
        Self {
            name: "churn".to_string(),
            input: "rhm-churn.txt".to_string(),
            output: "plot_churn.png".to_string(),
            x_column: default_x_column(),
            y_column: default_y_column(),
            x_label: "percent of churn test({num_churn_ops})".to_string(),
            y_label: "throughput (num ops per sec)".to_string(),
            title: None,
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::insert(), Self::churn()]
    }
}

/// 命令列傳入、只用於軸標籤文字的兩個數值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelValues {
    pub num_keys: i64,
    pub num_churn_ops: i64,
}

impl LabelValues {
    pub fn new(num_keys: i64, num_churn_ops: i64) -> Self {
        Self {
            num_keys,
            num_churn_ops,
        }
    }

    /// 替換 `{num_keys}` 與 `{num_churn_ops}` 佔位符
    pub fn apply(&self, template: &str) -> String {
        template
            .replace("{num_keys}", &self.num_keys.to_string())
            .replace("{num_churn_ops}", &self.num_churn_ops.to_string())
    }
}

/// Dry run 輸出的繪圖計畫
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlan {
    pub name: String,
    pub input: String,
    pub output: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<String>,
    pub points: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl ChartPlan {
    pub fn new(job: &ChartJob, output: String, chart: &Chart) -> Self {
        Self {
            name: job.name.clone(),
            input: job.input.clone(),
            output,
            x_label: chart.x_label.clone(),
            y_label: chart.y_label.clone(),
            series: chart.series.iter().map(|s| s.name.clone()).collect(),
            points: chart.point_count(),
            x_range: (chart.x_range.start, chart.x_range.end),
            y_range: (chart.y_range.start, chart.y_range.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_values_apply() {
        let labels = LabelValues::new(100000, 2500);

        assert_eq!(
            labels.apply(&ChartJob::insert().x_label),
            "percent of keys inserted (100000)"
        );
        assert_eq!(
            labels.apply(&ChartJob::churn().x_label),
            "percent of churn test(2500)"
        );
        assert_eq!(
            labels.apply("throughput (num ops per sec)"),
            "throughput (num ops per sec)"
        );
    }

    #[test]
    fn test_default_jobs() {
        let jobs = ChartJob::defaults();
        let outputs: Vec<&str> = jobs.iter().map(|j| j.output.as_str()).collect();
        assert_eq!(outputs, vec!["plot_insert.png", "plot_churn.png"]);
        assert!(jobs.iter().all(|j| j.x_column == "x_0" && j.y_column == "y_0"));
    }
}

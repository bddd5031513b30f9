use crate::domain::model::{Chart, ChartJob, LabelValues, Series, Table};
use crate::utils::error::{PlotError, Result};
use std::ops::Range;

const AXIS_MARGIN: f64 = 0.05;

/// 依工作設定從表格建立圖表模型
pub fn build_chart(
    job: &ChartJob,
    table: &Table,
    labels: &LabelValues,
    all_series: bool,
) -> Result<Chart> {
    // 預設欄位必須存在，即使在 all_series 模式
    let mut series = vec![load_series(table, &job.x_column, &job.y_column)?];

    if all_series {
        for k in table.series_indices() {
            let (x_column, y_column) = (format!("x_{}", k), format!("y_{}", k));
            if x_column == job.x_column && y_column == job.y_column {
                continue;
            }
            series.push(load_series(table, &x_column, &y_column)?);
        }
    }

    let x_range = axis_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
    let y_range = axis_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));
    ensure_plottable(table, "x", &x_range)?;
    ensure_plottable(table, "y", &y_range)?;

    Ok(Chart {
        title: job.title.as_deref().map(|t| labels.apply(t)),
        x_label: labels.apply(&job.x_label),
        y_label: labels.apply(&job.y_label),
        series,
        x_range,
        y_range,
    })
}

fn load_series(table: &Table, x_column: &str, y_column: &str) -> Result<Series> {
    let xs = table.column(x_column)?;
    let ys = table.column(y_column)?;

    let points: Vec<(f64, f64)> = xs
        .into_iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    let dropped = table.len() - points.len();
    if dropped > 0 {
        tracing::warn!(
            "⚠️ {}: dropped {} non-finite points from {}/{}",
            table.source,
            dropped,
            x_column,
            y_column
        );
    }

    Ok(Series {
        name: y_column.to_string(),
        points,
    })
}

/// plotters 以 end - start 換算座標，跨度必須是有限值
fn ensure_plottable(table: &Table, axis: &str, range: &Range<f64>) -> Result<()> {
    if (range.end - range.start).is_finite() {
        Ok(())
    } else {
        Err(PlotError::UnplottableRangeError {
            file: table.source.clone(),
            axis: axis.to_string(),
        })
    }
}

/// 數值範圍加上兩側 5% 邊界；無資料時為 0..1。兩端一定是有限值
pub fn axis_range<I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let bounds = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        });

    match bounds {
        None => 0.0..1.0,
        Some((lo, hi)) if lo == hi => {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * AXIS_MARGIN };
            (lo - pad).max(f64::MIN)..(hi + pad).min(f64::MAX)
        }
        Some((lo, hi)) => {
            // hi - lo 可能溢位，先各自乘上邊界比例
            let pad = hi * AXIS_MARGIN - lo * AXIS_MARGIN;
            (lo - pad).max(f64::MIN)..(hi + pad).min(f64::MAX)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::parse_table;

    fn labels() -> LabelValues {
        LabelValues::new(1000, 500)
    }

    #[test]
    fn test_axis_range_adds_margin() {
        let range = axis_range(vec![0.0, 100.0, 50.0]);
        assert_eq!(range, -5.0..105.0);
    }

    #[test]
    fn test_axis_range_single_value() {
        assert_eq!(axis_range(vec![200.0]), 190.0..210.0);
        assert_eq!(axis_range(vec![0.0, 0.0]), -1.0..1.0);
    }

    #[test]
    fn test_axis_range_empty_and_non_finite() {
        assert_eq!(axis_range(Vec::new()), 0.0..1.0);
        assert_eq!(axis_range(vec![f64::NAN, f64::INFINITY]), 0.0..1.0);
    }

    #[test]
    fn test_axis_range_near_f64_limits_stays_finite() {
        let range = axis_range(vec![-1.7e308, 1.7e308]);
        assert!(range.start.is_finite() && range.end.is_finite());
        assert!(range.start <= -1.7e308 && range.end >= 1.7e308);

        let range = axis_range(vec![f64::MAX]);
        assert!(range.start.is_finite() && range.end.is_finite());
        assert_eq!(range.end, f64::MAX);
    }

    #[test]
    fn test_overflowing_span_is_rejected() {
        let table = parse_table("rhm-insert.txt", "x_0 y_0\n1 -1.7e308\n2 1.7e308\n").unwrap();
        let result = build_chart(&ChartJob::insert(), &table, &labels(), false);

        assert!(matches!(
            result,
            Err(PlotError::UnplottableRangeError { axis, .. }) if axis == "y"
        ));
    }

    #[test]
    fn test_large_but_finite_span_is_plotted() {
        let table = parse_table("rhm-insert.txt", "x_0 y_0\n1 0\n2 1e308\n").unwrap();
        let chart = build_chart(&ChartJob::insert(), &table, &labels(), false).unwrap();

        assert!((chart.y_range.end - chart.y_range.start).is_finite());
        assert!(chart.y_range.start <= 0.0 && chart.y_range.end >= 1e308);
    }

    #[test]
    fn test_truncated_last_row_is_skipped() {
        let table = parse_table("rhm-insert.txt", "x_0 y_0\n1 10\n2 20\n3\n").unwrap();
        let chart = build_chart(&ChartJob::insert(), &table, &labels(), false).unwrap();

        assert_eq!(chart.series[0].points, vec![(1.0, 10.0), (2.0, 20.0)]);
    }

    #[test]
    fn test_build_default_chart() {
        let content = "x_0 y_0 x_1 y_1\n10 100 10 50\n20 300 20 60\n";
        let table = parse_table("rhm-insert.txt", content).unwrap();
        let chart = build_chart(&ChartJob::insert(), &table, &labels(), false).unwrap();

        assert_eq!(chart.x_label, "percent of keys inserted (1000)");
        assert_eq!(chart.y_label, "throughput (num inserts per sec)");
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points, vec![(10.0, 100.0), (20.0, 300.0)]);
        assert!(!chart.has_legend());
        assert!(chart.x_range.start <= 10.0 && chart.x_range.end >= 20.0);
        assert!(chart.y_range.start <= 100.0 && chart.y_range.end >= 300.0);
    }

    #[test]
    fn test_build_all_series_chart() {
        let content = "x_0 y_0 x_1 y_1\n10 100 10 50\n20 300 20 600\n";
        let table = parse_table("rhm-churn.txt", content).unwrap();
        let chart = build_chart(&ChartJob::churn(), &table, &labels(), true).unwrap();

        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["y_0", "y_1"]);
        assert!(chart.has_legend());
        assert!(chart.y_range.end >= 600.0);
        assert_eq!(chart.x_label, "percent of churn test(500)");
    }

    #[test]
    fn test_missing_default_column_fails_in_all_series_mode() {
        let table = parse_table("rhm-churn.txt", "x_1 y_1\n10 100\n").unwrap();
        let result = build_chart(&ChartJob::churn(), &table, &labels(), true);
        assert!(matches!(result, Err(PlotError::MissingColumnError { .. })));
    }

    #[test]
    fn test_non_finite_points_are_dropped() {
        let table = parse_table("rhm-insert.txt", "x_0 y_0\n1 nan\n2 20\n3 inf\n").unwrap();
        let chart = build_chart(&ChartJob::insert(), &table, &labels(), false).unwrap();
        assert_eq!(chart.series[0].points, vec![(2.0, 20.0)]);
        assert_eq!(chart.point_count(), 1);
    }

    #[test]
    fn test_title_template_is_applied() {
        let mut job = ChartJob::insert();
        job.title = Some("insert {num_keys} keys".to_string());
        let table = parse_table("rhm-insert.txt", "x_0 y_0\n1 2\n").unwrap();
        let chart = build_chart(&job, &table, &labels(), false).unwrap();
        assert_eq!(chart.title.as_deref(), Some("insert 1000 keys"));
    }
}

use crate::domain::model::Table;
use crate::utils::error::{PlotError, Result};

/// 解析空白分隔的表格：第一個非空行為欄位名稱，連續空白視為單一分隔符。
/// 欄位不足的行以 `nan` 補齊，多出欄位則報錯
pub fn parse_table(source: &str, content: &str) -> Result<Table> {
    // csv 不支援連續空白分隔，先正規化為單一 tab
    let normalized: String = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join("\t"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .has_headers(true)
        .flexible(true)
        .from_reader(normalized.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(PlotError::ExtraFieldsError {
                file: source.to_string(),
                row: index + 1,
                expected: headers.len(),
                found: record.len(),
            });
        }

        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.len() < headers.len() {
            tracing::warn!(
                "⚠️ {}: row {} has {} of {} fields, missing values read as nan",
                source,
                index + 1,
                row.len(),
                headers.len()
            );
            row.resize(headers.len(), "nan".to_string());
        }
        rows.push(row);
    }

    tracing::debug!(
        "Parsed {}: {} columns, {} rows",
        source,
        headers.len(),
        rows.len()
    );

    Ok(Table {
        source: source.to_string(),
        headers,
        rows,
    })
}

impl Table {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PlotError::MissingColumnError {
                file: self.source.clone(),
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// 取出一個欄位並轉為浮點數；row 編號從 1 起算（不含標題行）
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self.column_index(name)?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row, fields)| {
                let raw = fields[index].as_str();
                raw.parse::<f64>()
                    .map_err(|_| PlotError::InvalidNumberError {
                        file: self.source.clone(),
                        column: name.to_string(),
                        row: row + 1,
                        value: raw.to_string(),
                    })
            })
            .collect()
    }

    /// 找出同時存在 `x_k` 與 `y_k` 的所有 k，依序排列
    pub fn series_indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self
            .headers
            .iter()
            .filter_map(|h| h.strip_prefix("x_"))
            .filter_map(|k| k.parse::<u32>().ok())
            .filter(|k| self.has_column(&format!("y_{}", k)))
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

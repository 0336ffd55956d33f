use crate::error::{AggregateError, Result};
use crate::models::MetricPoint;

use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// 指标CSV中步数列和数值列的列名
#[derive(Debug, Clone)]
pub struct MetricColumns {
    pub step: String,
    pub value: String,
}

impl Default for MetricColumns {
    fn default() -> Self {
        Self {
            step: "Step".to_string(),
            value: "Value".to_string(),
        }
    }
}

/// 读取 `<performance>.csv`，文件缺失或格式错误都是致命错误
pub fn read_metric_log(path: &Path, columns: &MetricColumns) -> Result<Vec<MetricPoint>> {
    if !path.is_file() {
        return Err(AggregateError::MissingMetricLog { path: path.to_path_buf() });
    }
    let file = std::fs::File::open(path).map_err(|e| AggregateError::MetricLogRead {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    read_metric_log_from_reader(file, path, columns)
}

/// 从任意 reader 读取；`path` 只用于错误信息
pub fn read_metric_log_from_reader<R: Read>(
    reader: R,
    path: &Path,
    columns: &MetricColumns,
) -> Result<Vec<MetricPoint>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true) // 允许额外的列（例如 Wall time）
        .from_reader(reader);

    let read_err = |source: csv::Error| AggregateError::MetricLogRead {
        path: path.to_path_buf(),
        source,
    };

    let headers = rdr.headers().map_err(read_err)?.clone();
    let step_idx = column_index(&headers, &columns.step, path)?;
    let value_idx = column_index(&headers, &columns.value, path)?;

    let mut points = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result.map_err(read_err)?;
        let row = i + 2; // 行号从1开始，再加上表头

        points.push(MetricPoint {
            step: parse_cell(&rec, step_idx, &columns.step, row, path)?,
            value: parse_cell(&rec, value_idx, &columns.value, row, path)?,
        });
    }

    Ok(points)
}

fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| AggregateError::CsvHeader {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

fn parse_cell(rec: &StringRecord, idx: usize, column: &str, row: usize, path: &Path) -> Result<f64> {
    let raw = rec.get(idx).unwrap_or("");
    raw.parse::<f64>().map_err(|_| AggregateError::CsvValue {
        path: path.to_path_buf(),
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

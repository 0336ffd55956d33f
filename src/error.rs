use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AggregateError>;

/// 聚合过程中的致命错误，出现任意一个都会中止本次调用
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Failed to list search base '{}': {source}", .path.display())]
    SearchBase {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Metric log not found: {}", .path.display())]
    MissingMetricLog { path: PathBuf },

    #[error("Failed to read metric log {}: {source}", .path.display())]
    MetricLogRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid CSV header in {}: missing column '{column}'", .path.display())]
    CsvHeader { path: PathBuf, column: String },

    #[error("Invalid value in {} at row {row}, column '{column}': '{value}'", .path.display())]
    CsvValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },
}

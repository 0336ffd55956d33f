// models.rs - 作为模块目录入口文件（Rust 2018+ 风格）
pub mod config;
pub mod estimator;
pub mod models;
pub mod state;
pub mod utils;

// 重新导出常用类型
pub use config::{
    Config, ExportConfig, GeneralConfig, KeybindingsConfig, PlotConfig, TuiConfig,
};
pub use estimator::{Condition, Estimator, population_std};
pub use models::{Dataset, ExperimentName, MetricPoint, RunInfo, RunSeries, TaggedRow, NONE_GROUP_KEY};
pub use state::AppState;

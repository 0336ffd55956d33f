use std::collections::HashMap;
use std::path::{Path, PathBuf};
use crate::csv_reader::{MetricColumns, read_metric_log};
use crate::error::Result;
use crate::file_utils::{filter_logdirs, find_run_dirs, resolve_logdirs};
use crate::models::{Dataset, ExperimentName, GeneralConfig, RunInfo, RunSeries};
use crate::run_config_parser::read_experiment_name;
use crate::smoothing::smooth_datasets;

const DIV_LINE_WIDTH: usize = 50;

/// 运行发现与读取相关的设置
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub marker_file: String,
    pub exp_name_key: String,
    pub columns: MetricColumns,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self::from_config(&GeneralConfig::default())
    }
}

impl AggregateOptions {
    pub fn from_config(general: &GeneralConfig) -> Self {
        Self {
            marker_file: general.config_file.clone(),
            exp_name_key: general.exp_name_key.clone(),
            columns: MetricColumns {
                step: general.step_column.clone(),
                value: general.value_column.clone(),
            },
        }
    }
}

/// 一次聚合会话
///
/// 实例计数按实验名称记录，在同一会话处理的所有根目录之间共享。
/// 每次调用新建一个会话，计数不会在调用之间泄漏。
#[derive(Debug)]
pub struct Aggregator {
    options: AggregateOptions,
    units: HashMap<String, u32>,
}

impl Aggregator {
    pub fn new(options: AggregateOptions) -> Self {
        Self {
            options,
            units: HashMap::new(),
        }
    }

    /// 当前各实验名称的运行计数
    pub fn units(&self) -> &HashMap<String, u32> {
        &self.units
    }

    fn next_unit(&mut self, group_key: &str) -> u32 {
        let counter = self.units.entry(group_key.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// 递归查找 logdir 下的所有运行并读取指标序列
    ///
    /// 标记文件有问题只记录警告；指标CSV缺失或格式错误直接返回错误
    pub fn get_datasets(&mut self, logdir: &Path, performance: &str) -> Result<Vec<RunSeries>> {
        let mut datasets = Vec::new();

        for run_dir in find_run_dirs(logdir, &self.options.marker_file) {
            let exp_name = read_experiment_name(&run_dir, &self.options.marker_file, &self.options.exp_name_key);
            match &exp_name {
                ExperimentName::Present(_) => {}
                ExperimentName::FieldMissing => log::warn!(
                    "No '{}' field in {}, grouping as None",
                    self.options.exp_name_key,
                    run_dir.join(&self.options.marker_file).display()
                ),
                ExperimentName::FileMissing => log::warn!(
                    "No file named {} in {}",
                    self.options.marker_file,
                    run_dir.display()
                ),
                ExperimentName::Malformed(reason) => log::warn!(
                    "Failed to parse {}: {}",
                    run_dir.join(&self.options.marker_file).display(),
                    reason
                ),
            }

            let unit = self.next_unit(&exp_name.group_key());
            let run = RunInfo {
                path: run_dir.clone(),
                exp_name: exp_name.name().map(|s| s.to_string()),
                unit,
            };

            let metric_path = run_dir.join(format!("{}.csv", performance));
            let points = read_metric_log(&metric_path, &self.options.columns)?;
            log::debug!("Loaded {} rows for {} from {}", points.len(), run.unique_key(), metric_path.display());

            datasets.push(RunSeries::new(run, &points));
        }

        Ok(datasets)
    }

    /// 解析、筛选所有日志目录，并依次读取其中的运行
    pub fn get_all_datasets(
        &mut self,
        all_logdirs: &[String],
        performance: &str,
        select: Option<&[String]>,
        exclude: Option<&[String]>,
    ) -> Result<Vec<RunSeries>> {
        let logdirs = filter_logdirs(resolve_logdirs(all_logdirs)?, select, exclude);

        print_logdirs(&logdirs);

        let mut data = Vec::new();
        for log in &logdirs {
            data.extend(self.get_datasets(log, performance)?);
        }
        Ok(data)
    }

    /// 完整流程：读取、平滑、拼接
    pub fn load_dataset(
        &mut self,
        all_logdirs: &[String],
        performance: &str,
        smooth: usize,
        select: Option<&[String]>,
        exclude: Option<&[String]>,
    ) -> Result<Dataset> {
        let mut data = self.get_all_datasets(all_logdirs, performance, select, exclude)?;
        smooth_datasets(&mut data, smooth);
        Ok(Dataset::concat(performance, data))
    }
}

/// 打印将要绘制的目录列表
fn print_logdirs(logdirs: &[PathBuf]) {
    let divider = "=".repeat(DIV_LINE_WIDTH);
    println!("Plotting from...\n{}\n", divider);
    for logdir in logdirs {
        println!("{}", logdir.display());
    }
    println!("\n{}", divider);
}

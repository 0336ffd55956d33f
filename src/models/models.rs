use std::path::PathBuf;

/// 没有实验名称时使用的分组键
pub const NONE_GROUP_KEY: &str = "None";

/// 读取运行配置标记文件中实验名称的结果
#[derive(Debug, Clone, PartialEq)]
pub enum ExperimentName {
    Present(String),
    FieldMissing,      // 文件可解析，但没有实验名称字段
    FileMissing,       // 目录中没有标记文件（或无法读取）
    Malformed(String), // 文件存在但解析失败
}

impl ExperimentName {
    pub fn name(&self) -> Option<&str> {
        match self {
            ExperimentName::Present(name) => Some(name),
            _ => None,
        }
    }

    /// 分组键：实验名称，缺失时为 "None"
    pub fn group_key(&self) -> String {
        self.name().unwrap_or(NONE_GROUP_KEY).to_string()
    }
}

/// 一次实验运行
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    pub path: PathBuf,           // 运行目录
    pub exp_name: Option<String>,
    pub unit: u32,               // 同一实验名称下的实例计数，从1开始
}

impl RunInfo {
    pub fn group_key(&self) -> String {
        self.exp_name.as_deref().unwrap_or(NONE_GROUP_KEY).to_string()
    }

    pub fn unique_key(&self) -> String {
        format!("{}-{}", self.group_key(), self.unit)
    }
}

/// 指标日志中的一行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPoint {
    pub step: f64,
    pub value: f64,
}

/// 打上运行标签的一行数据
///
/// `value` 始终是原始值，`metric` 是以指标名称命名的列，平滑时只修改它
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRow {
    pub step: f64,
    pub value: f64,
    pub unit: u32,
    pub condition1: String,
    pub condition2: String,
    pub metric: f64,
}

impl TaggedRow {
    /// "steps" 列，与 Step 列相同
    pub fn steps(&self) -> f64 {
        self.step
    }
}

/// 单个运行的带标签序列
#[derive(Debug, Clone, PartialEq)]
pub struct RunSeries {
    pub run: RunInfo,
    pub rows: Vec<TaggedRow>,
}

impl RunSeries {
    pub fn new(run: RunInfo, points: &[MetricPoint]) -> Self {
        let condition1 = run.group_key();
        let condition2 = run.unique_key();
        let rows = points
            .iter()
            .map(|p| TaggedRow {
                step: p.step,
                value: p.value,
                unit: run.unit,
                condition1: condition1.clone(),
                condition2: condition2.clone(),
                metric: p.value,
            })
            .collect();
        Self { run, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn metric_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.metric).collect()
    }

    /// 替换指标列，长度必须与行数一致
    pub fn set_metric_values(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.rows.len());
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.metric = *v;
        }
    }
}

/// 所有运行拼接后的数据集
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub performance: String, // 指标名称，同时也是指标列的列名
    pub rows: Vec<TaggedRow>,
}

impl Dataset {
    /// 按发现顺序拼接所有序列，不去重、不排序
    pub fn concat(performance: &str, series: Vec<RunSeries>) -> Self {
        let rows = series.into_iter().flat_map(|s| s.rows).collect();
        Self {
            performance: performance.to_string(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按列名取数值列
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let getter: fn(&TaggedRow) -> f64 = match name {
            "Step" => |r| r.step,
            "steps" => TaggedRow::steps,
            "Value" => |r| r.value,
            "Unit" => |r| r.unit as f64,
            _ if name == self.performance => |r| r.metric,
            _ => return None,
        };
        Some(self.rows.iter().map(getter).collect())
    }

    /// 按列名取标签列
    pub fn label_column(&self, name: &str) -> Option<Vec<&str>> {
        match name {
            "Condition1" => Some(self.rows.iter().map(|r| r.condition1.as_str()).collect()),
            "Condition2" => Some(self.rows.iter().map(|r| r.condition2.as_str()).collect()),
            _ => None,
        }
    }

    pub fn max_step(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.step).reduce(f64::max)
    }
}

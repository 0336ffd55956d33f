use std::fmt;
use std::str::FromStr;

/// 曲线中心值的聚合方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimator {
    Mean,
    Median,
    Max,
    Min,
    Sum,
}

// 名称到聚合方式的查找表
const ESTIMATOR_TABLE: [(&str, Estimator); 5] = [
    ("mean", Estimator::Mean),
    ("median", Estimator::Median),
    ("max", Estimator::Max),
    ("min", Estimator::Min),
    ("sum", Estimator::Sum),
];

impl Estimator {
    pub fn name(&self) -> &'static str {
        ESTIMATOR_TABLE
            .iter()
            .find(|(_, e)| e == self)
            .map(|(name, _)| *name)
            .unwrap_or("mean")
    }

    /// 对一组样本求值，空样本返回NaN
    pub fn apply(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        match self {
            Estimator::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Estimator::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(|a, b| a.total_cmp(b));
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
            Estimator::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Estimator::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Estimator::Sum => values.iter().sum(),
        }
    }
}

impl FromStr for Estimator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        ESTIMATOR_TABLE
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, e)| *e)
            .ok_or_else(|| {
                let known: Vec<&str> = ESTIMATOR_TABLE.iter().map(|(name, _)| *name).collect();
                format!("unknown estimator '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 曲线分组依据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    GroupKey,  // Condition1：同一实验名的多次运行取聚合值
    UniqueKey, // Condition2：每次运行单独一条曲线
}

const CONDITION_TABLE: [(&str, Condition); 4] = [
    ("group", Condition::GroupKey),
    ("condition1", Condition::GroupKey),
    ("unique", Condition::UniqueKey),
    ("condition2", Condition::UniqueKey),
];

impl Condition {
    /// 数据集中对应的列名
    pub fn column_name(&self) -> &'static str {
        match self {
            Condition::GroupKey => "Condition1",
            Condition::UniqueKey => "Condition2",
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        CONDITION_TABLE
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, c)| *c)
            .ok_or_else(|| format!("unknown condition '{}', expected group/Condition1 or unique/Condition2", s))
    }
}

/// 总体标准差（ddof = 0）
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    var.sqrt()
}

use crate::models::{Condition, Dataset, Estimator, PlotConfig, population_std};

/// 曲线上的一个点：中心值及其 ±1 标准差区间
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub step: f64,
    pub center: f64,
    pub lower: f64,
    pub upper: f64,
    pub samples: usize,
}

/// 一个条件（分组键或唯一键）对应的曲线
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub points: Vec<CurvePoint>,
}

/// 按条件和步数汇总数据集
///
/// 曲线按条件首次出现的顺序排列；每条曲线内按步数排序，每个步数一个点
pub fn summarize(dataset: &Dataset, condition: Condition, estimator: Estimator) -> Vec<Curve> {
    let mut groups: Vec<(&str, Vec<(f64, f64)>)> = Vec::new();

    for row in &dataset.rows {
        let label = match condition {
            Condition::GroupKey => row.condition1.as_str(),
            Condition::UniqueKey => row.condition2.as_str(),
        };
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, samples)) => samples.push((row.steps(), row.metric)),
            None => groups.push((label, vec![(row.steps(), row.metric)])),
        }
    }

    groups
        .into_iter()
        .map(|(label, mut samples)| {
            samples.sort_by(|a, b| a.0.total_cmp(&b.0));
            let points = samples
                .chunk_by(|a, b| a.0 == b.0)
                .map(|chunk| {
                    let values: Vec<f64> = chunk.iter().map(|(_, v)| *v).collect();
                    let center = estimator.apply(&values);
                    let sd = population_std(&values);
                    CurvePoint {
                        step: chunk[0].0,
                        center,
                        lower: center - sd,
                        upper: center + sd,
                        samples: values.len(),
                    }
                })
                .collect();
            Curve {
                label: label.to_string(),
                points,
            }
        })
        .collect()
}

/// 坐标轴范围
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl AxisBounds {
    /// 由曲线计算范围，可被配置中的固定范围覆盖；没有数据时返回 None
    pub fn from_curves<'a, I>(curves: I, plot: &PlotConfig) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Curve>,
    {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);

        for p in curves.into_iter().flat_map(|c| c.points.iter()) {
            if !p.center.is_finite() {
                continue;
            }
            x = (x.0.min(p.step), x.1.max(p.step));
            y = (y.0.min(p.lower), y.1.max(p.upper));
        }

        if !x.0.is_finite() {
            return None;
        }

        let x = widen((plot.x_min.unwrap_or(x.0), plot.x_max.unwrap_or(x.1)));
        let y = widen((plot.y_min.unwrap_or(y.0), plot.y_max.unwrap_or(y.1)));
        Some(Self { x, y })
    }

    /// x轴是否使用科学计数法
    pub fn use_sci_notation(&self, threshold: f64) -> bool {
        self.x.1 > threshold
    }
}

// 避免零宽度范围
fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        (lo - pad, hi + pad)
    }
}

/// 刻度标签格式
pub fn format_tick(value: f64, sci: bool) -> String {
    if sci {
        format!("{:.1e}", value)
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

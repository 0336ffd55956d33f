use crate::curves::Curve;
use crate::models::config::Config;
use crate::models::estimator::{Condition, Estimator};

/// 应用程序状态结构，包含指标名称、汇总曲线和配置
#[derive(Debug)]
pub struct AppState {
    pub performance: String,
    pub curves: Vec<Curve>,
    pub condition: Condition,
    pub estimator: Estimator,
    pub config: Config,
}

impl AppState {
    pub fn performance(&self) -> &str {
        &self.performance
    }
}

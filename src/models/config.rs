use serde::Deserialize;

/// 应用程序配置结构
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub plot: PlotConfig,
    pub export: ExportConfig,
    pub tui: TuiConfig,
    pub keybindings: KeybindingsConfig,
}

/// 通用配置：日志目录、标记文件以及指标CSV的列名
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_dirs: Vec<String>,
    pub config_file: String,  // 每个运行目录中的配置标记文件
    pub exp_name_key: String, // 标记文件中实验名称字段
    pub step_column: String,
    pub value_column: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_dirs: Vec::new(),
            config_file: "config.json".to_string(),
            exp_name_key: "exp_name".to_string(),
            step_column: "Step".to_string(),
            value_column: "Value".to_string(),
        }
    }
}

/// 静态图配置
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlotConfig {
    #[serde(deserialize_with = "crate::models::utils::deserialize_optional_string")]
    pub output: Option<String>,
    #[serde(deserialize_with = "crate::models::utils::deserialize_optional_string")]
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    // ————————————————————————————————————————————————————————————————————————
    // 坐标轴范围，未设置时根据数据自动计算
    // ————————————————————————————————————————————————————————————————————————
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub sci_threshold: f64, // 最大步数超过该值时x轴使用科学计数法
    pub band_opacity: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output: None,
            title: None,
            width: 1024,
            height: 768,
            x_min: None,
            x_max: None,
            y_min: None,
            y_max: None,
            sci_threshold: 5e3,
            band_opacity: 0.2,
        }
    }
}

/// 数据集导出配置
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ExportConfig {
    #[serde(deserialize_with = "crate::models::utils::deserialize_optional_string")]
    pub dataset_csv: Option<String>,
}

/// TUI界面配置
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TuiConfig {
    pub enabled: bool,
    pub refresh_rate_ms: u64,
    pub legend_panel_proportion: u16,
    pub show_band: bool,
    pub palette: Vec<String>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_rate_ms: 250,
            legend_panel_proportion: 25,
            show_band: true,
            palette: ["cyan", "yellow", "magenta", "green", "light_red", "light_blue"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// 键盘绑定配置
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub up: String,
    pub down: String,
    pub toggle_curve: String,
    pub toggle_band: String,
    pub zoom_in: String,
    pub zoom_out: String,
    pub pan_left: String,
    pub pan_right: String,
    pub reset: String,
    pub quit: String,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            up: "up".to_string(),
            down: "down".to_string(),
            toggle_curve: "space".to_string(),
            toggle_band: "b".to_string(),
            zoom_in: "+".to_string(),
            zoom_out: "-".to_string(),
            pan_left: "left".to_string(),
            pan_right: "right".to_string(),
            reset: "r".to_string(),
            quit: "q".to_string(),
        }
    }
}

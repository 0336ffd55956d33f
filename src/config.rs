use crate::models::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "curve_explorer.toml";

pub fn load_config(config_path: &str) -> Result<Config> {
    // 检查配置文件是否存在，如果不存在则创建默认配置
    if !Path::new(config_path).exists() {
        create_default_config(config_path)?;
        log::info!("Created default config file at {}", config_path);
    }

    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path))?;

    let config: Config = toml::from_str(&config_content)
        .with_context(|| format!("Failed to parse config file: {}", config_path))?;

    Ok(config)
}

fn create_default_config(config_path: &str) -> Result<()> {
    let default_config = r#"[general]
log_dirs = []
config_file = "config.json"
exp_name_key = "exp_name"
step_column = "Step"
value_column = "Value"

[plot]
output = ""
title = ""
width = 1024
height = 768
# x_min = 0.0
# x_max = 25e6
# y_min = 0.0
# y_max = 900.0
sci_threshold = 5e3
band_opacity = 0.2

[export]
dataset_csv = ""

[tui]
enabled = true
refresh_rate_ms = 250
legend_panel_proportion = 25
show_band = true
palette = ["cyan", "yellow", "magenta", "green", "light_red", "light_blue"]

[keybindings]
up = "up"
down = "down"
toggle_curve = "space"
toggle_band = "b"
zoom_in = "+"
zoom_out = "-"
pan_left = "left"
pan_right = "right"
reset = "r"
quit = "q"
"#;

    fs::write(config_path, default_config)
        .with_context(|| format!("Failed to create default config file: {}", config_path))?;

    Ok(())
}

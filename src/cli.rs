use clap::Parser;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::models::{Condition, Estimator};

/// Aggregate RL experiment logs and plot learning curves
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Log directories, or prefixes of log directories (falls back to general.log_dirs)
    #[arg(value_name = "LOGDIR")]
    pub logdirs: Vec<String>,

    /// Performance metric to load from `<performance>.csv`
    #[arg(short, long, default_value = "reward")]
    pub performance: String,

    /// Curve grouping: group/Condition1 averages runs sharing an experiment name, unique/Condition2 draws every run
    #[arg(short, long, default_value = "Condition1")]
    pub condition: Condition,

    /// Width of the moving-average smoothing window (1 disables smoothing)
    #[arg(short, long, default_value_t = 1)]
    pub smooth: usize,

    /// Only keep log directories containing all of these substrings
    #[arg(long, num_args = 1..)]
    pub select: Option<Vec<String>>,

    /// Drop log directories containing any of these substrings
    #[arg(long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Estimator for the main curve: mean, median, max, min, sum
    #[arg(short, long, default_value = "mean")]
    pub estimator: Estimator,

    /// Path to config TOML
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Write the figure to this file (.svg or .png, overrides config)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the aggregated dataset as CSV (overrides config)
    #[arg(long)]
    pub export: Option<String>,

    /// Do not open the interactive viewer
    #[arg(long, default_value_t = false)]
    pub no_tui: bool,
}

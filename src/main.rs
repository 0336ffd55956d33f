// src/main.rs
mod aggregator;
mod cli;
mod config;
mod csv_reader;
mod curves;
mod error;
mod export;
mod file_utils;
mod models;
mod plot;
mod run_config_parser;
mod smoothing;
mod tui;

use aggregator::{AggregateOptions, Aggregator};
use anyhow::{Result, bail};
use clap::Parser;
use cli::Args;
use config::load_config;
use curves::summarize;
use models::*;
use std::path::Path;
use tui::{App, TuiApp};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // 加载配置文件
    let config = load_config(&args.config)?;
    log::debug!("Configuration loaded from {}", args.config);

    let logdirs = if args.logdirs.is_empty() {
        config.general.log_dirs.clone()
    } else {
        args.logdirs.clone()
    };
    if logdirs.is_empty() {
        bail!("No log directories given on the command line or in general.log_dirs");
    }

    // 读取所有运行并拼接为一个数据集
    let mut aggregator = Aggregator::new(AggregateOptions::from_config(&config.general));
    let dataset = aggregator.load_dataset(
        &logdirs,
        &args.performance,
        args.smooth,
        args.select.as_deref(),
        args.exclude.as_deref(),
    )?;

    println!(
        "Loaded {} rows from {} runs in {} experiment groups",
        dataset.len(),
        aggregator.units().values().sum::<u32>(),
        aggregator.units().len()
    );
    if let Some(max_step) = dataset.max_step() {
        println!("Last step: {}", max_step);
    }

    let curves = summarize(&dataset, args.condition, args.estimator);
    for curve in &curves {
        println!("  {} ({} points)", curve.label, curve.points.len());
    }

    if let Some(path) = args.export.as_ref().or(config.export.dataset_csv.as_ref()) {
        export::write_dataset_csv(&dataset, Path::new(path))?;
        println!("Dataset written to {}", path);
    }

    if let Some(path) = args.output.as_ref().or(config.plot.output.as_ref()) {
        plot::render_figure(&curves, &dataset.performance, &config.plot, Path::new(path))?;
        println!("Figure written to {}", path);
    }

    if !config.tui.enabled || args.no_tui {
        return Ok(());
    }
    if curves.is_empty() {
        log::warn!("No curves to display for {}", args.performance);
        return Ok(());
    }

    let keybindings = config.keybindings.clone();
    let state = AppState {
        performance: dataset.performance,
        curves,
        condition: args.condition,
        estimator: args.estimator,
        config,
    };
    let mut tui_app = TuiApp::new(App::new(state), keybindings)?;
    tui_app.run()
}

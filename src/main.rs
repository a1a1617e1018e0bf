mod app;
mod cli;
mod color;
mod data;
mod scene;
mod state;
mod ui;

use std::process::ExitCode;

use anyhow::{Context, Result};
use app::PlotCutsApp;
use clap::Parser;
use cli::{Cli, Command, PlotCutsConfig};
use data::cuts::load_tree_file;
use data::loader::{load_table, read_header};
use eframe::egui;
use scene::{CutScene, SceneInputs};
use state::AppState;

fn main() -> ExitCode {
    env_logger::init();

    let command = match Cli::parse().into_command() {
        Ok(command) => command,
        Err(missing) => {
            eprintln!("{missing}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = match command {
        Command::ListDimensions { filepath } => list_dimensions(&filepath),
        Command::Plot(config) => prepare(&config).and_then(|state| show(state, &config)),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn list_dimensions(filepath: &std::path::Path) -> Result<()> {
    let header = read_header(filepath)?;
    println!("Dimensions available:");
    for name in header {
        println!("{name}");
    }
    Ok(())
}

/// Load every input and build the scene before any window opens.
fn prepare(config: &PlotCutsConfig) -> Result<AppState> {
    for notice in config.notices() {
        println!("{notice}");
    }

    let results = load_table(&config.filepath)?;
    if results.is_empty() {
        log::warn!("{} holds no triggers", config.filepath.display());
    }
    let zero_lag = config.zeropath.as_deref().map(load_table).transpose()?;

    let cuts = match &config.treepath {
        Some(path) => Some(load_tree_file(path)?),
        None => {
            log::info!("No tree file given; plotting triggers without cuts");
            None
        }
    };

    let scene = CutScene::build(SceneInputs {
        results: &results,
        zero_lag: zero_lag.as_ref(),
        cuts: cuts.as_ref(),
        x_name: &config.x,
        y_name: &config.y,
        x_scale: config.x_scale,
        y_scale: config.y_scale,
    })?;

    Ok(AppState::new(scene, config.treepath.clone()))
}

fn show(state: AppState, config: &PlotCutsConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &format!("mvsc_plot_cuts – {} vs {}", config.x, config.y),
        options,
        Box::new(move |_cc| Ok(Box::new(PlotCutsApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the viewer")
}

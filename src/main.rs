use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use titanic_explorer::app::ExplorerApp;
use titanic_explorer::cli::Cli;
use titanic_explorer::data::load_and_preprocess;
use titanic_explorer::report;
use titanic_explorer::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.report {
        return print_report(&cli);
    }

    let mut state = AppState::default();
    state.banner = cli.banner.canonicalize().ok();
    state.load_path(&cli.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic Explorer",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render png/jpg/etc.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ExplorerApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

fn print_report(cli: &Cli) -> Result<()> {
    let table = load_and_preprocess(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;
    let criteria = cli.filters.criteria();
    let report = report::build(&table, &criteria, &cli.filters.group_by)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

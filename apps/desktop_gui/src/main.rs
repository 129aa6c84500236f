mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::AdvocateApp;

#[derive(Parser, Debug)]
#[command(name = "advocate-gui", version)]
struct Args {
    /// Analysis service base URL; overrides settings file and environment.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.server_url {
        settings.analysis_base_url = url;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(client_core::view::APP_TITLE)
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        client_core::view::APP_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(AdvocateApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop window: {err}"))
}

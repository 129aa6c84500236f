use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings,
    view::{self, AnalyzerView, OutcomeView, APP_TAGLINE, APP_TITLE, EXPLANATION_HEADING},
    AnalyzeController, HttpAnalysisClient, SelectedFile,
};
use tracing_subscriber::EnvFilter;

/// Upload a contract to the analysis service and print its risk verdict.
#[derive(Parser, Debug)]
#[command(name = "advocate", version)]
struct Args {
    /// PDF contract to analyze.
    file: PathBuf,
    /// Analysis service base URL; overrides settings file and environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Give up on the request after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print the raw service result as JSON instead of the formatted view.
    #[arg(long)]
    json: bool,
}

fn render(view: &AnalyzerView) -> String {
    let mut out = format!("{APP_TITLE}\n{APP_TAGLINE}\n\nFile: {}\n", view.file_label);
    match &view.outcome {
        OutcomeView::Idle => {}
        OutcomeView::Error(err) => {
            out.push_str(&format!("\nError: {}\n", err.message));
        }
        OutcomeView::Result(card) => {
            out.push_str(&format!(
                "\n{}\n[{}]\n\n{EXPLANATION_HEADING}\n{}\n\n{}\n",
                card.score_line, card.badge, card.explanation, card.filename_line
            ));
        }
    }
    out
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.server_url {
        settings.analysis_base_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }

    let client = HttpAnalysisClient::new(&settings).context("invalid analysis settings")?;
    let file = SelectedFile::load(&args.file)?;

    let mut controller = AnalyzeController::new();
    controller.select_file(Some(file));
    let outcome = controller.analyze(&client).await;

    if args.json {
        if let Ok(result) = &outcome {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }
    if !args.json || outcome.is_err() {
        print!("{}", render(&view::project(controller.state())));
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

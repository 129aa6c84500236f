//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{AnalysisService, HttpAnalysisClient, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "Backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let client = match HttpAnalysisClient::new(&settings) {
            Ok(client) => client,
            Err(err) => {
                tracing::error!("invalid analysis settings: {err:#}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "Invalid analysis service settings: {err:#}"
                )));
                return;
            }
        };
        tracing::info!(endpoint = %client.endpoint(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Analysis service: {}",
            client.endpoint()
        )));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Analyze(pending) => {
                        tracing::info!(filename = pending.file.name(), "backend: analyze");
                        let outcome = client.analyze(&pending.file).await;
                        if ui_tx
                            .send(UiEvent::AnalysisFinished {
                                ticket: pending.ticket,
                                outcome,
                            })
                            .is_err()
                        {
                            tracing::debug!("ui closed; dropping analysis outcome");
                            break;
                        }
                    }
                }
            }
        });
    });
}

use std::{path::Path, time::Duration};

use client_core::{
    view::{
        self, AnalyzerView, OutcomeView, ResultCard, RiskTone, APP_TAGLINE, APP_TITLE,
        EXPLANATION_HEADING,
    },
    AnalyzeController, AnalyzeError, ControllerState, SelectedFile,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

fn tone_color(tone: RiskTone) -> egui::Color32 {
    match tone {
        RiskTone::Low => egui::Color32::from_rgb(35, 165, 90),
        RiskTone::Medium => egui::Color32::from_rgb(230, 160, 40),
        RiskTone::High => egui::Color32::from_rgb(240, 71, 71),
        RiskTone::Neutral => egui::Color32::from_rgb(120, 125, 135),
    }
}

pub struct AdvocateApp {
    controller: AnalyzeController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
}

impl AdvocateApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            controller: AnalyzeController::new(),
            cmd_tx,
            ui_rx,
            status: "Backend worker starting...".to_string(),
        }
    }

    pub fn state(&self) -> &ControllerState {
        self.controller.state()
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::BackendUnavailable(message) => self.status = message,
                UiEvent::AnalysisFinished { ticket, outcome } => {
                    self.controller.complete_analysis(ticket, outcome);
                }
            }
        }
    }

    fn pick_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("PDF contract", &["pdf"])
            .pick_file();
        if let Some(path) = picked {
            self.select_path(&path);
        }
    }

    fn select_path(&mut self, path: &Path) {
        match SelectedFile::load(path) {
            Ok(file) => self.controller.select_file(Some(file)),
            Err(err) => {
                tracing::warn!("failed to load selected file: {err:#}");
                self.status = format!("Failed to read file: {err:#}");
            }
        }
    }

    fn start_analysis(&mut self) {
        let pending = match self.controller.begin_analysis() {
            Ok(pending) => pending,
            Err(err) => {
                tracing::debug!("analyze rejected: {err}");
                return;
            }
        };

        let ticket = pending.ticket;
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Analyze(pending),
            &mut self.status,
        ) {
            self.controller
                .complete_analysis(ticket, Err(AnalyzeError::Transport(self.status.clone())));
        }
    }

    fn show_outcome(ui: &mut egui::Ui, view: &AnalyzerView) {
        match &view.outcome {
            OutcomeView::Idle => {}
            OutcomeView::Error(err) => {
                egui::Frame::NONE
                    .fill(egui::Color32::from_rgb(111, 53, 53))
                    .stroke(egui::Stroke::new(
                        1.0,
                        egui::Color32::from_rgb(175, 96, 96),
                    ))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(10, 8))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(format!("⚠ {}", err.message))
                                .color(egui::Color32::WHITE),
                        );
                    });
            }
            OutcomeView::Result(card) => Self::show_result_card(ui, card),
        }
    }

    fn show_result_card(ui: &mut egui::Ui, card: &ResultCard) {
        let accent = tone_color(card.tone);
        egui::Frame::NONE
            .stroke(egui::Stroke::new(2.0, accent))
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(16, 14))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(&card.score_line).strong().size(22.0));
                egui::Frame::NONE
                    .fill(accent)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(8, 4))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(&card.badge)
                                .strong()
                                .color(egui::Color32::WHITE),
                        );
                    });
                ui.add_space(8.0);
                ui.label(egui::RichText::new(EXPLANATION_HEADING).strong().size(16.0));
                ui.label(card.explanation.as_str());
                ui.add_space(8.0);
                ui.small(egui::RichText::new(&card.filename_line).weak());
            });
    }
}

impl eframe::App for AdvocateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let view = view::project(self.state());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(APP_TITLE);
            ui.label(APP_TAGLINE);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                if ui.button(view.file_label.as_str()).clicked() {
                    self.pick_file();
                }
                if ui
                    .add_enabled(view.trigger.enabled, egui::Button::new(view.trigger.label))
                    .clicked()
                {
                    self.start_analysis();
                }
                if self.state().loading {
                    ui.spinner();
                }
            });

            ui.add_space(12.0);
            Self::show_outcome(ui, &view);

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });

        if self.state().loading {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env, fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use client_core::error::CONNECT_FAILURE_MESSAGE;
    use crossbeam_channel::bounded;
    use shared::{
        domain::{RiskLevel, RiskScore},
        protocol::AnalysisResult,
    };

    use super::*;

    fn app_with_lease() -> (AdvocateApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let mut app = AdvocateApp::new(cmd_tx, ui_rx);
        app.controller
            .select_file(Some(SelectedFile::new("lease.pdf", b"%PDF".to_vec())));
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn analyze_queues_command_and_applies_backend_result() {
        let (mut app, cmd_rx, ui_tx) = app_with_lease();

        app.start_analysis();
        assert!(app.state().loading);
        let BackendCommand::Analyze(pending) = cmd_rx.try_recv().expect("queued command");
        assert_eq!(pending.file.name(), "lease.pdf");

        let result = AnalysisResult {
            risk_score: RiskScore::new(10).expect("score"),
            risk_level: RiskLevel::Low,
            explanation: "This contract looks standard.".to_string(),
            filename: "lease.pdf".to_string(),
        };
        ui_tx
            .send(UiEvent::AnalysisFinished {
                ticket: pending.ticket,
                outcome: Ok(result.clone()),
            })
            .expect("send");
        app.process_ui_events();

        assert!(!app.state().loading);
        assert_eq!(app.state().result, Some(result));
    }

    #[test]
    fn dead_worker_resolves_request_as_connectivity_failure() {
        let (mut app, cmd_rx, _ui_tx) = app_with_lease();
        drop(cmd_rx);

        app.start_analysis();
        assert!(!app.state().loading);
        assert_eq!(app.state().error_message(), Some(CONNECT_FAILURE_MESSAGE));
    }

    #[test]
    fn analyze_without_file_sends_nothing() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (_ui_tx, ui_rx) = bounded(4);
        let mut app = AdvocateApp::new(cmd_tx, ui_rx);

        app.start_analysis();
        assert!(cmd_rx.try_recv().is_err());
        assert!(app.state().error.is_some());
    }

    #[test]
    fn unreadable_path_keeps_previous_selection() {
        let (mut app, _cmd_rx, _ui_tx) = app_with_lease();
        app.select_path(Path::new("/definitely/not/here.pdf"));
        assert_eq!(
            app.state().selected_file.as_ref().map(|file| file.name()),
            Some("lease.pdf")
        );
        assert!(app.status.starts_with("Failed to read file"));
    }

    #[test]
    fn selecting_path_loads_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let temp_root = env::temp_dir().join(format!("advocate_gui_test_{suffix}"));
        fs::create_dir_all(&temp_root).expect("temp root");
        let path = temp_root.join("policy.pdf");
        fs::write(&path, b"%PDF-1.7").expect("write");

        let (mut app, _cmd_rx, _ui_tx) = app_with_lease();
        app.select_path(&path);
        assert_eq!(
            app.state().selected_file.as_ref().map(|file| file.name()),
            Some("policy.pdf")
        );

        fs::remove_dir_all(temp_root).expect("cleanup");
    }

    #[test]
    fn backend_status_events_update_status_line() {
        let (mut app, _cmd_rx, ui_tx) = app_with_lease();
        ui_tx
            .send(UiEvent::BackendUnavailable("Invalid analysis service settings".into()))
            .expect("send");
        app.process_ui_events();
        assert_eq!(app.status, "Invalid analysis service settings");
    }
}

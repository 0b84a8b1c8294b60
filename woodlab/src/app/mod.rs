pub mod common;
mod components;
pub mod config;
mod events;
mod measurement_store;
pub mod storage;
#[cfg(test)]
mod testing;
mod workbench;

use crate::BackendAppState;
use app_core::backend::RequestSender;
use config::Config;
use events::SaveLoadRequested;
use storage::{load_json, save_json};

pub use self::workbench::Workbench;

use std::{thread::JoinHandle, time::Duration};

pub type DynRequestSender = RequestSender<BackendAppState>;

/// How often the window polls for replies while requests are in flight.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct EguiApp {
    config: Config,
    backend_thread_handle: Option<JoinHandle<()>>,
    workbench: Workbench,
    shortcuts_modal_open: bool,
}

impl EguiApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        request_tx: DynRequestSender,
        backend_thread_handle: JoinHandle<()>,
    ) -> Self {
        let workbench = Workbench::new(config.wood_types.clone(), request_tx);
        Self {
            config,
            backend_thread_handle: Some(backend_thread_handle),
            workbench,
            shortcuts_modal_open: false,
        }
    }

    fn request_save_dialog(&mut self) {
        log::debug!("open dialog to select save path");
        let handle = std::thread::spawn(|| {
            rfd::FileDialog::new()
                .add_filter("session", &["json"])
                .set_file_name("woodlab_session.json")
                .save_file()
        });
        let event = SaveLoadRequested::new(true, Some(handle));
        self.workbench.event_queue.queue_event(Box::new(event));
    }

    fn request_load_dialog(&mut self) {
        log::debug!("open dialog to select load path");
        let handle = std::thread::spawn(|| {
            rfd::FileDialog::new()
                .add_filter("session", &["json"])
                .pick_file()
        });
        let event = SaveLoadRequested::new(false, Some(handle));
        self.workbench.event_queue.queue_event(Box::new(event));
    }

    fn quick_save(&self) {
        if let Err(error) = save_json(&self.workbench, None) {
            log::error!("{}", error)
        };
    }

    fn quick_load(&mut self) {
        // Plot images are fetched on the backend, so loading on the UI
        // thread is fine.
        if let Err(error) = load_json(&mut self.workbench, None) {
            log::error!("{}", error)
        };
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.workbench.update_state();
        if self.workbench.take_redraw() {
            ctx.request_repaint();
        }
        if self.workbench.is_busy() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        let mut should_quit = false;

        // Handle keyboard input.
        ctx.input(|i| {
            // Help window.
            if i.key_pressed(egui::Key::F1) {
                self.shortcuts_modal_open = !self.shortcuts_modal_open;
            }
            // Quick save session.
            if i.key_pressed(egui::Key::F6) {
                self.quick_save();
            }
            // Quick load session.
            if i.key_pressed(egui::Key::F5) {
                self.quick_load();
            }
            // Close app.
            if i.key_pressed(egui::Key::F10) {
                // Quitting cannot be requested from within here, the UI stops,
                // but not the backend thread.
                should_quit = true;
            }
            if i.key_pressed(egui::Key::S) && i.modifiers.ctrl {
                self.request_save_dialog();
            }
            if i.key_pressed(egui::Key::L) && i.modifiers.ctrl {
                self.request_load_dialog();
            }
        });

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_shortcut_modal(ctx);
            self.render_alert(ctx);
            self.menu(ui, ctx);
        });

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            self.status_line(ui);
        });

        egui::SidePanel::left("tool_palette")
            .resizable(false)
            .show(ctx, |ui| {
                self.workbench.palette.render_palette(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.central_panel(ui);
            });
        });

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(handle) = self.backend_thread_handle.take() {
            app_core::backend::request_stop(&self.workbench.request_tx, handle);
        }
    }
}

impl EguiApp {
    fn central_panel(&mut self, ui: &mut egui::Ui) {
        let workbench = &mut self.workbench;

        ui.heading("Wood Samples");
        if let Some(drop) = workbench
            .palette
            .render_samples(&workbench.wood_types, &workbench.store, ui)
        {
            workbench.drop_tool(drop);
        }
        ui.separator();

        ui.heading("Measurements");
        workbench.measurements.render(ui);
        ui.separator();

        ui.heading("Calculations");
        if let Some(property) = workbench.calculations.render(ui) {
            workbench.calculate_property(property);
        }
        ui.separator();

        ui.heading("Plots");
        workbench.plots.render(self.config.plot_width, ui);
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Session", |ui| {
                if ui.button("Save").clicked() {
                    self.request_save_dialog();
                }
                if ui.button("Load").clicked() {
                    self.request_load_dialog();
                }
                if ui.button("Quick Save").clicked() {
                    self.quick_save();
                }
                if ui.button("Quick Load").clicked() {
                    self.quick_load();
                }
                if ui.button("Reset Session").clicked() {
                    self.workbench.reset();
                };
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.toggle_value(&mut self.shortcuts_modal_open, "Help (F1)");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });
    }

    fn status_line(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!("Server: {}", self.config.server_url));
            ui.separator();
            match self.workbench.palette.dragged() {
                Some(tool) => ui.label(format!("Dragging {}", tool.label())),
                None => ui.label("Drag a tool onto a sample to measure it."),
            };
            let store = &self.workbench.store;
            if !store.is_empty() {
                let complete = store.iter().filter(|(_, r)| r.is_complete()).count();
                ui.separator();
                ui.label(format!("{complete} of {} samples fully measured", store.len()));
            }
            let pending = self.workbench.num_pending();
            if pending > 0 {
                ui.separator();
                ui.spinner();
                ui.label(format!("{pending} request(s) in flight"));
            }
        });
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.workbench.alert else {
            return;
        };
        let mut dismissed = false;
        let modal = egui::Modal::new("alert_modal".into()).show(ctx, |ui| {
            ui.set_max_width(320.0);
            ui.label(message.as_str());
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
        if dismissed || modal.should_close() {
            self.workbench.alert = None;
        }
    }

    fn render_shortcut_modal(&mut self, ctx: &egui::Context) {
        if self.shortcuts_modal_open
            && egui::Modal::new("shortcut_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("CTRL + S = Open Save Dialog");
                    ui.separator();
                    ui.label("CTRL + L = Open Load Dialog");
                    ui.separator();
                    ui.label("F1 = Show Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F6 = Save Session");
                    ui.separator();
                    ui.label("F5 = Load Session");
                    ui.separator();
                    ui.label("F10 = Quit App");
                    ui.separator();
                })
                .should_close()
        {
            self.shortcuts_modal_open = false;
        };
    }
}

use egui::{Frame, RichText};

use crate::app::measurement_store::MeasurementStore;
use crate::wood::{Tool, WoodType};

use super::ToolDrop;

impl super::ToolPalette {
    /// The draggable instruments.
    pub fn render_palette(&mut self, ui: &mut egui::Ui) {
        match egui::DragAndDrop::payload::<Tool>(ui.ctx()) {
            Some(tool) => self.start_drag(*tool),
            None if self.dragged().is_some() => self.drag_ended(),
            None => (),
        }

        ui.heading("Tools");
        ui.label("Drag a tool onto a wood sample.");
        ui.add_space(8.0);
        for tool in Tool::ALL {
            let id = egui::Id::new(("tool", tool.id()));
            ui.dnd_drag_source(id, tool, |ui| {
                Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_width(140.0);
                    ui.label(RichText::new(tool.label()).strong());
                });
            })
            .response
            .on_hover_cursor(egui::CursorIcon::Grab);
            ui.add_space(4.0);
        }
    }

    /// One drop zone per wood type, each marking the tools that already
    /// measured it. Returns the drop that happened this frame, if any.
    pub fn render_samples(
        &mut self,
        woods: &[WoodType],
        store: &MeasurementStore,
        ui: &mut egui::Ui,
    ) -> Option<ToolDrop> {
        let mut dropped = None;
        let mut hovered = None;

        ui.horizontal_wrapped(|ui| {
            for wood in woods {
                let fill = if self.is_highlighted(wood) {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().faint_bg_color
                };
                let response = Frame::group(ui.style())
                    .fill(fill)
                    .show(ui, |ui| {
                        ui.set_min_size(egui::vec2(110.0, 70.0));
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(wood.as_str()).heading());
                            let record = store.get(wood);
                            ui.horizontal(|ui| {
                                for tool in Tool::ALL {
                                    let taken = record.and_then(|r| r.get(tool)).is_some();
                                    let mark = if taken { "●" } else { "○" };
                                    ui.label(mark).on_hover_text(tool.label());
                                }
                            });
                        });
                    })
                    .response;

                if response.dnd_hover_payload::<Tool>().is_some() {
                    hovered = Some(wood);
                }
                if let Some(tool) = response.dnd_release_payload::<Tool>() {
                    dropped = Some(self.drop_on(wood, *tool));
                }
            }
        });

        match hovered {
            Some(wood) if dropped.is_none() => self.drag_over(wood),
            _ => self.drag_left(),
        }
        dropped
    }
}

use egui::{load::SizedTexture, Color32, RichText};

use crate::wood::Property;

impl super::PlotPanel {
    pub fn render(&mut self, width: f32, ui: &mut egui::Ui) {
        ui.horizontal_top(|ui| {
            for plot in self.images.iter_mut() {
                ui.vertical(|ui| {
                    ui.set_width(width);
                    ui.strong(plot.property.label());
                    plot.render(width, ui);
                });
            }
        });
    }
}

impl super::PlotImage {
    fn render(&mut self, width: f32, ui: &mut egui::Ui) {
        if !self.image.is_up_to_date() {
            ui.spinner();
        }
        match self.image.value() {
            Some(Ok(image)) => {
                let texture = self.texture.get_or_insert_with(|| {
                    ui.ctx().load_texture(
                        texture_name(self.property),
                        image.clone(),
                        egui::TextureOptions::LINEAR,
                    )
                });
                let response = ui.add(
                    egui::Image::from_texture(SizedTexture::from_handle(texture))
                        .max_width(width),
                );
                if let Some(source) = self.source() {
                    response.on_hover_text(source);
                }
            }
            Some(Err(err)) => {
                ui.label(RichText::new(format!("Could not load plot: {err}")).color(Color32::RED));
            }
            None => {
                ui.label(RichText::new("No plot yet.").italics());
            }
        }
    }
}

fn texture_name(property: Property) -> String {
    format!("{}_plot", property.key())
}

use crate::wood::{Property, Tool};

impl super::CalculationTable {
    /// Returns the property whose calculate button was clicked.
    pub fn render(&mut self, ui: &mut egui::Ui) -> Option<Property> {
        egui::Grid::new("calculation_table")
            .striped(true)
            .num_columns(7)
            .min_col_width(70.0)
            .show(ui, |ui| {
                ui.strong("Wood Type");
                for tool in Tool::ALL {
                    ui.strong(tool.label());
                }
                for property in Property::ALL {
                    ui.strong(property.label());
                }
                ui.end_row();

                for row in self.rows.iter_mut() {
                    ui.label(row.wood.as_str());
                    for input in row.inputs.iter_mut() {
                        ui.add_enabled(
                            input.enabled,
                            egui::TextEdit::singleline(&mut input.text).desired_width(70.0),
                        );
                    }
                    for output in row.outputs.iter() {
                        ui.label(output.as_deref().unwrap_or(""));
                    }
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        let mut clicked = None;
        ui.horizontal(|ui| {
            for property in Property::ALL {
                if ui.button(format!("Calculate {}", property.label())).clicked() {
                    clicked = Some(property);
                }
            }
        });
        clicked
    }
}

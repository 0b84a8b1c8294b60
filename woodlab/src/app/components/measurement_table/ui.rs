use crate::wood::Tool;

impl super::MeasurementTable {
    pub fn render(&self, ui: &mut egui::Ui) {
        if self.rows.is_empty() {
            ui.label(egui::RichText::new("No measurements yet.").italics());
            return;
        }
        egui::Grid::new("measurement_table")
            .striped(true)
            .num_columns(4)
            .min_col_width(90.0)
            .show(ui, |ui| {
                ui.strong("Wood Type");
                for tool in Tool::ALL {
                    ui.strong(tool.label());
                }
                ui.end_row();

                for row in self.rows.iter() {
                    ui.label(row.wood.as_str());
                    for cell in row.cells.iter() {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            });
    }
}

use crate::wood::{Tool, WoodType};

use super::MeasurementRow;

impl super::MeasurementTable {
    /// Show `raw` in the cell of `tool` in the row of `wood`, creating the
    /// row first if needed.
    pub fn add_measurement(&mut self, tool: Tool, wood: &WoodType, raw: &str) {
        let row = self.row_or_insert(wood);
        row.cells[tool.column()] = raw.to_owned();
    }

    fn row_or_insert(&mut self, wood: &WoodType) -> &mut MeasurementRow {
        let idx = match self.rows.iter().position(|row| &row.wood == wood) {
            Some(idx) => idx,
            None => {
                log::debug!("adding measurement row for {wood}");
                self.rows.push(MeasurementRow::new(wood.clone()));
                self.rows.len() - 1
            }
        };
        &mut self.rows[idx]
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
impl super::MeasurementTable {
    pub fn row(&self, wood: &WoodType) -> Option<&MeasurementRow> {
        self.rows.iter().find(|row| &row.wood == wood)
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }
}

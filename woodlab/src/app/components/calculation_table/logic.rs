use crate::app::common::{format_value, parse_float};
use crate::wood::{Property, Tool, WoodType};

use super::{CalculationRow, InputField, RowInputs};

impl super::CalculationTable {
    pub fn new(woods: &[WoodType]) -> Self {
        let rows = woods
            .iter()
            .map(|wood| CalculationRow {
                wood: wood.clone(),
                inputs: Default::default(),
                outputs: Default::default(),
            })
            .collect();
        Self { rows }
    }

    /// Write `value` into the input of `tool` for `wood` and enable it.
    /// Returns false if there is no row for `wood`.
    pub fn set_input(&mut self, wood: &WoodType, tool: Tool, value: f64) -> bool {
        let Some(row) = self.row_mut(wood) else {
            return false;
        };
        row.inputs[tool.column()] = InputField {
            text: format_value(value),
            enabled: true,
        };
        true
    }

    /// Show `value` in the output cell of `property` for `wood`. Returns
    /// false if there is no row for `wood`.
    pub fn set_output(&mut self, wood: &WoodType, property: Property, value: f64) -> bool {
        let Some(row) = self.row_mut(wood) else {
            return false;
        };
        row.outputs[property.index()] = Some(format_value(value));
        true
    }

    /// What the calculation buttons work on: every row in display order,
    /// with the input text parsed as numbers.
    pub fn rows_view(&self) -> Vec<RowInputs> {
        self.rows
            .iter()
            .map(|row| {
                let [density, porosity, moisture] =
                    [0, 1, 2].map(|col| parse_float(&row.inputs[col].text));
                RowInputs {
                    wood: row.wood.clone(),
                    density,
                    porosity,
                    moisture,
                }
            })
            .collect()
    }

    fn row_mut(&mut self, wood: &WoodType) -> Option<&mut CalculationRow> {
        self.rows.iter_mut().find(|row| &row.wood == wood)
    }
}

#[cfg(test)]
impl super::CalculationTable {
    pub fn row(&self, wood: &WoodType) -> Option<&CalculationRow> {
        self.rows.iter().find(|row| &row.wood == wood)
    }
}

mod logic;
mod ui;

use serde::{Deserialize, Serialize};

use crate::api::CalculationRequest;
use crate::wood::WoodType;

/// Inputs (density, porosity, moisture) and computed properties per wood
/// type. The rows exist from the start; inputs stay disabled until a
/// reading for them was taken.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CalculationTable {
    rows: Vec<CalculationRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationRow {
    pub wood: WoodType,
    /// Indexed by `Tool::column`.
    pub inputs: [InputField; 3],
    /// Indexed by `Property::index`.
    pub outputs: [Option<String>; 3],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    pub text: String,
    pub enabled: bool,
}

/// The numbers currently entered in one row, NaN where the input is not a
/// number.
#[derive(Clone, Debug, PartialEq)]
pub struct RowInputs {
    pub wood: WoodType,
    pub density: f64,
    pub porosity: f64,
    pub moisture: f64,
}

impl RowInputs {
    pub fn is_complete(&self) -> bool {
        !(self.density.is_nan() || self.porosity.is_nan() || self.moisture.is_nan())
    }

    pub fn to_request(&self) -> CalculationRequest {
        CalculationRequest {
            wood_type: self.wood.clone(),
            density: self.density,
            porosity: self.porosity,
            moisture: self.moisture,
        }
    }
}

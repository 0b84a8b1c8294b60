mod logic;
mod ui;

use serde::{Deserialize, Serialize};

use crate::wood::WoodType;

/// Shown in cells for which no reading exists yet.
pub const PLACEHOLDER: &str = "-";

/// Raw readings as reported by the instruments, one row per wood type.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MeasurementTable {
    rows: Vec<MeasurementRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub wood: WoodType,
    /// Density, porosity and moisture, indexed by `Tool::column`.
    pub cells: [String; 3],
}

impl MeasurementRow {
    fn new(wood: WoodType) -> Self {
        Self {
            wood,
            cells: std::array::from_fn(|_| PLACEHOLDER.to_owned()),
        }
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::wood::{Tool, WoodType};

/// The readings taken so far for one wood type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub density: Option<f64>,
    /// Fraction between 0 and 1.
    pub porosity: Option<f64>,
    /// Fraction between 0 and 1.
    pub moisture: Option<f64>,
}

impl MeasurementRecord {
    pub fn get(&self, tool: Tool) -> Option<f64> {
        match tool {
            Tool::DensityMeter => self.density,
            Tool::PorosityMeter => self.porosity,
            Tool::MoistureMeter => self.moisture,
        }
    }

    fn slot_mut(&mut self, tool: Tool) -> &mut Option<f64> {
        match tool {
            Tool::DensityMeter => &mut self.density,
            Tool::PorosityMeter => &mut self.porosity,
            Tool::MoistureMeter => &mut self.moisture,
        }
    }

    pub fn is_complete(&self) -> bool {
        Tool::ALL
            .iter()
            .all(|tool| self.get(*tool).is_some_and(|v| !v.is_nan()))
    }
}

/// Parsed readings per wood type. Records are created on the first reading
/// for a wood type; a new reading of the same tool replaces the old one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MeasurementStore {
    records: BTreeMap<WoodType, MeasurementRecord>,
}

impl MeasurementStore {
    pub fn record(&mut self, wood: &WoodType, tool: Tool, value: f64) {
        let record = self.records.entry(wood.clone()).or_default();
        *record.slot_mut(tool) = Some(value);
    }

    pub fn get(&self, wood: &WoodType) -> Option<&MeasurementRecord> {
        self.records.get(wood)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WoodType, &MeasurementRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

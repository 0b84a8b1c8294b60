use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a wood species; the row key of every table.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WoodType(String);

impl WoodType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WoodType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A measurement instrument that can be dropped onto a wood sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    DensityMeter,
    PorosityMeter,
    MoistureMeter,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::DensityMeter, Tool::PorosityMeter, Tool::MoistureMeter];

    /// Identifier used on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            Tool::DensityMeter => "density_meter",
            Tool::PorosityMeter => "porosity_meter",
            Tool::MoistureMeter => "moisture_meter",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tool::DensityMeter => "Density Meter",
            Tool::PorosityMeter => "Porosity Meter",
            Tool::MoistureMeter => "Moisture Meter",
        }
    }

    /// Column index in the measurement and calculation tables.
    pub fn column(&self) -> usize {
        match self {
            Tool::DensityMeter => 0,
            Tool::PorosityMeter => 1,
            Tool::MoistureMeter => 2,
        }
    }

    /// The number read from a raw measurement is divided by this. Porosity
    /// and moisture arrive in percent but are stored as fractions.
    pub fn divisor(&self) -> f64 {
        match self {
            Tool::DensityMeter => 1.0,
            Tool::PorosityMeter | Tool::MoistureMeter => 100.0,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A derived property computed by the simulation server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    Hardness,
    MoistureResistance,
    TensileStrength,
}

impl Property {
    pub const ALL: [Property; 3] = [
        Property::Hardness,
        Property::MoistureResistance,
        Property::TensileStrength,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Property::Hardness => "hardness",
            Property::MoistureResistance => "moisture_resistance",
            Property::TensileStrength => "tensile_strength",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Property::Hardness => "Hardness",
            Property::MoistureResistance => "Moisture Resistance",
            Property::TensileStrength => "Tensile Strength",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Property::Hardness => 0,
            Property::MoistureResistance => 1,
            Property::TensileStrength => 2,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

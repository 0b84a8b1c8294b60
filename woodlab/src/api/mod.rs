//! Requests and replies exchanged with the simulation server.
//!
//! Replies are decoded leniently: the server answers errors with a body like
//! `{"error": "Invalid wood type"}`, which decodes into a reply without
//! measurement or with `success == false`.

mod http;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::wood::{Property, WoodType};

pub use self::http::HttpSimulationApi;

/// Results of one calculation batch, keyed by wood type.
pub type PropertyResults = BTreeMap<WoodType, f64>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not decode reply: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not decode plot image: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeasurementRequest {
    pub tool_id: String,
    pub wood_type: WoodType,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MeasurementReply {
    #[serde(default)]
    pub measurement: Option<String>,
}

impl MeasurementReply {
    /// The raw reading, if the server produced a non-empty one.
    pub fn reading(&self) -> Option<&str> {
        self.measurement.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationRequest {
    pub wood_type: WoodType,
    pub density: f64,
    pub porosity: f64,
    pub moisture: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CalculationReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub hardness: Option<f64>,
    #[serde(default)]
    pub moisture_resistance: Option<f64>,
    #[serde(default)]
    pub tensile_strength: Option<f64>,
}

impl CalculationReply {
    /// The computed value of `property`, only if the server reported success.
    pub fn value(&self, property: Property) -> Option<f64> {
        if !self.success {
            return None;
        }
        match property {
            Property::Hardness => self.hardness,
            Property::MoistureResistance => self.moisture_resistance,
            Property::TensileStrength => self.tensile_strength,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlotRequest {
    pub hardness: PropertyResults,
    pub moisture_resistance: PropertyResults,
    pub tensile_strength: PropertyResults,
}

impl PlotRequest {
    /// A request carrying `results` for `property` and nothing for the
    /// other two properties.
    pub fn single(property: Property, results: PropertyResults) -> Self {
        let mut request = Self::default();
        match property {
            Property::Hardness => request.hardness = results,
            Property::MoistureResistance => request.moisture_resistance = results,
            Property::TensileStrength => request.tensile_strength = results,
        }
        request
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PlotUrls {
    #[serde(default)]
    pub hardness: Option<String>,
    #[serde(default)]
    pub moisture_resistance: Option<String>,
    #[serde(default)]
    pub tensile_strength: Option<String>,
}

impl PlotUrls {
    pub fn get(&self, property: Property) -> Option<&str> {
        let url = match property {
            Property::Hardness => &self.hardness,
            Property::MoistureResistance => &self.moisture_resistance,
            Property::TensileStrength => &self.tensile_strength,
        };
        url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PlotReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub plot_urls: PlotUrls,
}

/// The calls the workbench makes to the simulation server.
pub trait SimulationApi: Send + Sync {
    fn get_measurement(&self, request: &MeasurementRequest) -> Result<MeasurementReply, ApiError>;
    fn calculate_properties(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationReply, ApiError>;
    fn update_plot(&self, request: &PlotRequest) -> Result<PlotReply, ApiError>;
    /// Raw bytes of a plot image.
    fn fetch_plot(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

mod plot_image;

use app_core::backend::BackendState;

use crate::api::{
    ApiError, CalculationReply, CalculationRequest, MeasurementReply, MeasurementRequest,
    PlotReply, PlotRequest, SimulationApi,
};
use crate::wood::{Tool, WoodType};

pub use plot_image::decode_plot;
#[cfg(test)]
pub(crate) use plot_image::encode_png;

/// Everything the backend workers share: the connection to the
/// simulation server.
pub struct BackendAppState {
    api: Box<dyn SimulationApi>,
}

impl BackendState for BackendAppState {}

impl BackendAppState {
    pub fn new(api: impl SimulationApi + 'static) -> Self {
        Self { api: Box::new(api) }
    }
}

/// Implementations of backend actions
impl BackendAppState {
    pub fn get_measurement(
        &self,
        tool: Tool,
        wood: &WoodType,
    ) -> Result<MeasurementReply, ApiError> {
        let request = MeasurementRequest {
            tool_id: tool.id().to_owned(),
            wood_type: wood.clone(),
        };
        self.api.get_measurement(&request)
    }

    pub fn calculate_properties(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationReply, ApiError> {
        self.api.calculate_properties(request)
    }

    pub fn update_plot(&self, request: &PlotRequest) -> Result<PlotReply, ApiError> {
        self.api.update_plot(request)
    }

    /// Download and decode the plot image at `url`.
    pub fn load_plot(&self, url: &str) -> Result<egui::ColorImage, ApiError> {
        let bytes = self.api.fetch_plot(url)?;
        decode_plot(&bytes)
    }
}

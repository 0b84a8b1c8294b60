use std::time::Duration;

use reqwest::blocking::Client;
use serde::{de::DeserializeOwned, Serialize};

use super::{
    ApiError, CalculationReply, CalculationRequest, MeasurementReply, MeasurementRequest,
    PlotReply, PlotRequest, SimulationApi,
};

const GET_MEASUREMENT: &str = "/get_measurement";
const CALCULATE_PROPERTIES: &str = "/calculate_properties";
const UPDATE_PLOT: &str = "/update_plot";

/// Talks JSON over HTTP to the simulation server at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpSimulationApi {
    client: Client,
    base_url: String,
}

impl HttpSimulationApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url.to_owned()));
        }
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Absolute URL for `path`; absolute URLs are returned unchanged.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_owned()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn post<Q: Serialize, R: DeserializeOwned>(&self, path: &str, body: &Q) -> Result<R, ApiError> {
        let url = self.resolve(path);
        log::debug!("POST {url}");
        let response = self.client.post(&url).json(body).send()?;
        let status = response.status();
        // Error replies carry a JSON body as well, so the status is only logged.
        if !status.is_success() {
            log::debug!("POST {url} answered with status {status}");
        }
        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl SimulationApi for HttpSimulationApi {
    fn get_measurement(&self, request: &MeasurementRequest) -> Result<MeasurementReply, ApiError> {
        self.post(GET_MEASUREMENT, request)
    }

    fn calculate_properties(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationReply, ApiError> {
        self.post(CALCULATE_PROPERTIES, request)
    }

    fn update_plot(&self, request: &PlotRequest) -> Result<PlotReply, ApiError> {
        self.post(UPDATE_PLOT, request)
    }

    fn fetch_plot(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.resolve(url);
        log::debug!("GET {url}");
        let response = self.client.get(&url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

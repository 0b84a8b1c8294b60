//! A scripted simulation server and helpers to drive a `Workbench`
//! through the real backend event loop.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use app_core::backend::BackendEventLoop;

use crate::api::{
    ApiError, CalculationReply, CalculationRequest, MeasurementReply, MeasurementRequest,
    PlotReply, PlotRequest, PlotUrls, SimulationApi,
};
use crate::backend_state::encode_png;
use crate::wood::{Tool, WoodType};
use crate::BackendAppState;

use super::{DynRequestSender, Workbench};

#[derive(Default)]
struct Script {
    measurements: HashMap<(Tool, WoodType), String>,
    failing: HashSet<WoodType>,
    rejected: HashSet<WoodType>,
    delays: HashMap<WoodType, Duration>,
    plot_urls: PlotUrls,
    measurement_requests: Vec<MeasurementRequest>,
    calculation_requests: Vec<CalculationRequest>,
    plot_requests: Vec<PlotRequest>,
    fetched: Vec<String>,
}

/// Answers from canned data and remembers every call. Clones share the
/// same script, so a test keeps one clone to inspect the calls.
#[derive(Clone, Default)]
pub struct FakeApi {
    script: Arc<Mutex<Script>>,
}

impl FakeApi {
    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub fn with_measurement(self, tool: Tool, wood: &str, raw: &str) -> Self {
        self.script()
            .measurements
            .insert((tool, WoodType::from(wood)), raw.to_owned());
        self
    }

    /// Calculations for `wood` fail with an undecodable reply.
    pub fn failing_for(self, wood: &str) -> Self {
        self.script().failing.insert(WoodType::from(wood));
        self
    }

    /// The server answers calculations for `wood` with `success == false`.
    pub fn rejecting_for(self, wood: &str) -> Self {
        self.script().rejected.insert(WoodType::from(wood));
        self
    }

    pub fn delayed_for(self, wood: &str, delay: Duration) -> Self {
        self.script().delays.insert(WoodType::from(wood), delay);
        self
    }

    pub fn with_plot_urls(self, plot_urls: PlotUrls) -> Self {
        self.script().plot_urls = plot_urls;
        self
    }

    pub fn measurement_requests(&self) -> Vec<MeasurementRequest> {
        self.script().measurement_requests.clone()
    }

    pub fn calculation_requests(&self) -> Vec<CalculationRequest> {
        self.script().calculation_requests.clone()
    }

    pub fn plot_requests(&self) -> Vec<PlotRequest> {
        self.script().plot_requests.clone()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.script().fetched.clone()
    }
}

fn broken_reply() -> ApiError {
    ApiError::Decode(serde_json::from_str::<CalculationReply>("<html>").unwrap_err())
}

impl SimulationApi for FakeApi {
    fn get_measurement(&self, request: &MeasurementRequest) -> Result<MeasurementReply, ApiError> {
        let mut script = self.script();
        script.measurement_requests.push(request.clone());
        let measurement = Tool::from_id(&request.tool_id).and_then(|tool| {
            script
                .measurements
                .get(&(tool, request.wood_type.clone()))
                .cloned()
        });
        Ok(MeasurementReply { measurement })
    }

    fn calculate_properties(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationReply, ApiError> {
        let (delay, fails, rejected) = {
            let mut script = self.script();
            script.calculation_requests.push(request.clone());
            (
                script.delays.get(&request.wood_type).copied(),
                script.failing.contains(&request.wood_type),
                script.rejected.contains(&request.wood_type),
            )
        };
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        if fails {
            return Err(broken_reply());
        }
        if rejected {
            // values without success must not be used
            return Ok(CalculationReply {
                success: false,
                hardness: Some(-1.0),
                ..Default::default()
            });
        }
        Ok(CalculationReply {
            success: true,
            hardness: Some(request.density * (1.0 - request.porosity)),
            moisture_resistance: Some(100.0 * (1.0 - request.moisture)),
            tensile_strength: Some(request.density * 2.5),
        })
    }

    fn update_plot(&self, request: &PlotRequest) -> Result<PlotReply, ApiError> {
        let mut script = self.script();
        script.plot_requests.push(request.clone());
        Ok(PlotReply {
            success: true,
            plot_urls: script.plot_urls.clone(),
        })
    }

    fn fetch_plot(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.script().fetched.push(url.to_owned());
        Ok(encode_png(4, 3))
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A workbench whose backend runs on `api`.
pub fn start(api: FakeApi, woods: &[&str]) -> (Workbench, DynRequestSender, JoinHandle<()>) {
    init_logger();
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let handle = BackendEventLoop::new(request_rx, BackendAppState::new(api)).run();
    let woods = woods.iter().map(|wood| WoodType::from(*wood)).collect();
    let workbench = Workbench::new(woods, request_tx.clone());
    (workbench, request_tx, handle)
}

/// Runs frames until nothing is in flight anymore.
pub fn settle(workbench: &mut Workbench) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        workbench.update_state();
        if !workbench.is_busy() {
            return;
        }
        assert!(Instant::now() < deadline, "workbench did not settle");
        std::thread::sleep(Duration::from_millis(5));
    }
}

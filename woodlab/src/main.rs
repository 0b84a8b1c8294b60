#![warn(clippy::all, rust_2018_idioms)]

use std::time::Duration;

use app_core::backend::BackendEventLoop;
use woodlab::{api::HttpSimulationApi, BackendAppState, Config, EguiApp};

const WINDOW_NAME: &str = "Wood Lab";
const WINDOW_WIDTH: f32 = 1100.0;
const WINDOW_HEIGHT: f32 = 800.0;
const MIN_WINDOW_WIDTH: f32 = 640.0;
const MIN_WINDOW_HEIGHT: f32 = 480.0;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match Config::from_config_file() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("unable to load config file \".woodlab\" from home directory: {err}");
            Config::default()
        }
    };
    log::info!("using simulation server at {}", config.server_url);

    let api = match HttpSimulationApi::new(
        &config.server_url,
        Duration::from_secs(config.request_timeout_secs),
    ) {
        Ok(api) => api,
        Err(err) => {
            log::error!("unable to set up HTTP client: {err}");
            std::process::exit(1);
        }
    };

    // start backend loop
    let (command_tx, command_rx) = std::sync::mpsc::channel();
    let backend_state = BackendAppState::new(api);
    let eventloop_handle = BackendEventLoop::new(command_rx, backend_state).run();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_NAME,
        native_options,
        Box::new(|cc| {
            Ok(Box::new(EguiApp::new(
                cc,
                config,
                command_tx,
                eventloop_handle,
            )))
        }),
    )
}

use std::path::Path;

use app_core::storage::Storage;
use serde::{Deserialize, Serialize};

use super::components::{CalculationTable, MeasurementTable};
use super::measurement_store::MeasurementStore;
use super::Workbench;

// The backend only holds the connection to the server, nothing to store.
#[derive(Clone, Serialize, Deserialize)]
struct BackendStorage {}

#[derive(Serialize, Deserialize)]
struct FrontendStorage {
    store: MeasurementStore,
    measurements: MeasurementTable,
    calculations: CalculationTable,
    /// Cache-busted URLs of the hardness, moisture resistance and tensile
    /// strength plots.
    plot_sources: [Option<String>; 3],
}

pub fn save_json(app: &Workbench, path: Option<&Path>) -> Result<(), String> {
    let backend_storage = BackendStorage {};

    let frontend_storage = FrontendStorage {
        store: app.store.clone(),
        measurements: app.measurements.clone(),
        calculations: app.calculations.clone(),
        plot_sources: app.plots.sources(),
    };
    let storage = Storage::new(backend_storage, frontend_storage);
    storage.save_json(path)
}

pub fn load_json(app: &mut Workbench, path: Option<&Path>) -> Result<(), String> {
    let Storage::<BackendStorage, FrontendStorage> {
        backend_storage: _,
        frontend_storage,
    } = Storage::load_json(path)?;

    // Replies for the previous session must not land in the loaded one.
    app.event_queue.discard_events();
    app.store = frontend_storage.store;
    app.measurements = frontend_storage.measurements;
    app.calculations = frontend_storage.calculations;
    app.alert = None;
    // The images themselves are not stored, they are fetched again.
    app.plots
        .restore(frontend_storage.plot_sources, &app.request_tx);
    app.request_redraw();
    Ok(())
}

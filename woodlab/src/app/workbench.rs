use crate::wood::{Property, Tool, WoodType};

use super::common::parse_measurement;
use super::components::{CalculationTable, MeasurementTable, PlotPanel, ToolDrop, ToolPalette};
use super::events::{CalculationBatch, EventQueue, MeasurementRequested};
use super::measurement_store::MeasurementStore;
use super::DynRequestSender;

/// Everything the window shows, independent of egui.
pub struct Workbench {
    pub(crate) store: MeasurementStore,
    pub(crate) palette: ToolPalette,
    pub(crate) measurements: MeasurementTable,
    pub(crate) calculations: CalculationTable,
    pub(crate) plots: PlotPanel,
    pub(crate) request_tx: DynRequestSender,
    pub(crate) event_queue: EventQueue<Self>,
    /// Text of the modal alert, shown until dismissed.
    pub(crate) alert: Option<String>,
    pub(crate) wood_types: Vec<WoodType>,
    request_redraw: Option<()>,
}

impl Workbench {
    pub fn new(wood_types: Vec<WoodType>, request_tx: DynRequestSender) -> Self {
        Self {
            store: MeasurementStore::default(),
            palette: ToolPalette::default(),
            measurements: MeasurementTable::default(),
            calculations: CalculationTable::new(&wood_types),
            plots: PlotPanel::default(),
            request_tx,
            event_queue: EventQueue::new(),
            alert: None,
            wood_types,
            request_redraw: None,
        }
    }

    /// Ask the server for a reading of `drop.tool` on `drop.wood`.
    pub fn drop_tool(&mut self, drop: ToolDrop) {
        log::info!("{} dropped on {}", drop.tool, drop.wood);
        let event = MeasurementRequested::dispatch(drop, &self.request_tx);
        self.event_queue.queue_event(Box::new(event));
    }

    /// A reading arrived: show it verbatim and feed its number to the
    /// calculation table.
    pub fn apply_measurement(&mut self, tool: Tool, wood: &WoodType, raw: &str) {
        self.measurements.add_measurement(tool, wood, raw);
        self.update_calculation_table(tool, wood, raw);
    }

    pub fn update_calculation_table(&mut self, tool: Tool, wood: &WoodType, raw: &str) {
        let value = parse_measurement(raw) / tool.divisor();
        self.store.record(wood, tool, value);
        if !self.calculations.set_input(wood, tool, value) {
            log::warn!("no calculation row for {wood}, reading of {tool} is only stored");
        }
    }

    /// Send one calculation request per row, unless a row lacks a number,
    /// in which case nothing is sent and the user is alerted.
    pub fn calculate_property(&mut self, property: Property) {
        let rows = self.calculations.rows_view();
        if let Some(incomplete) = rows.iter().find(|row| !row.is_complete()) {
            let message = format!(
                "Please ensure all measurements are entered for {}.",
                incomplete.wood
            );
            log::warn!("not calculating {property}: {message}");
            self.alert = Some(message);
            return;
        }
        log::debug!("calculating {property} for {} rows", rows.len());
        let batch = CalculationBatch::dispatch(property, &rows, &self.request_tx);
        self.event_queue.queue_event(Box::new(batch));
    }

    /// Processes backend replies. Returns true if anything changed.
    pub fn update_state(&mut self) -> bool {
        let events_finished = self.run_events();
        let plots_loaded = self.plots.try_update();
        if events_finished || plots_loaded {
            self.request_redraw();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        log::debug!("resetting session");
        self.event_queue.discard_events();
        self.store.clear();
        self.measurements.clear();
        self.calculations = CalculationTable::new(&self.wood_types);
        self.plots = PlotPanel::default();
        self.palette = ToolPalette::default();
        self.alert = None;
        self.request_redraw();
    }

    /// Number of events still waiting for the backend.
    pub fn num_pending(&self) -> usize {
        self.event_queue.len()
    }

    pub fn is_busy(&self) -> bool {
        !self.event_queue.is_empty() || self.plots.is_loading()
    }

    pub fn request_redraw(&mut self) {
        self.request_redraw = Some(());
    }

    pub fn take_redraw(&mut self) -> bool {
        self.request_redraw.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use app_core::backend::request_stop;

    use super::*;
    use crate::api::{MeasurementRequest, PlotRequest, PlotUrls};
    use crate::app::testing::{settle, start, FakeApi};

    fn wood(name: &str) -> WoodType {
        WoodType::from(name)
    }

    fn fill(workbench: &mut Workbench, name: &str, readings: [&str; 3]) {
        for (tool, raw) in Tool::ALL.into_iter().zip(readings) {
            workbench.apply_measurement(tool, &wood(name), raw);
        }
    }

    #[test]
    fn test_repeated_readings_keep_one_row() {
        let (mut workbench, tx, handle) = start(FakeApi::default(), &["Oak"]);
        workbench.apply_measurement(Tool::DensityMeter, &wood("Oak"), "0.70 g/cm³");
        workbench.apply_measurement(Tool::DensityMeter, &wood("Oak"), "0.72 g/cm³");
        workbench.apply_measurement(Tool::MoistureMeter, &wood("Oak"), "12%");

        let rows = workbench.measurements.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells, ["0.72 g/cm³", "-", "12%"]);
        request_stop(&tx, handle);
    }

    #[test]
    fn test_readings_are_scaled_formatted_and_enabled() {
        let (mut workbench, tx, handle) = start(FakeApi::default(), &["Oak", "Pine"]);
        fill(&mut workbench, "Oak", ["0.75 g/cm³", "45%", "no reading"]);

        let record = workbench.store.get(&wood("Oak")).unwrap();
        assert_eq!(record.density, Some(0.75));
        assert_eq!(record.porosity, Some(0.45));
        assert!(record.moisture.unwrap().is_nan());

        let row = workbench.calculations.row(&wood("Oak")).unwrap();
        let texts: Vec<_> = row.inputs.iter().map(|input| input.text.as_str()).collect();
        assert_eq!(texts, ["0.75", "0.45", "NaN"]);
        assert!(row.inputs.iter().all(|input| input.enabled));

        let pine = workbench.calculations.row(&wood("Pine")).unwrap();
        assert!(pine.inputs.iter().all(|input| !input.enabled));
        request_stop(&tx, handle);
    }

    #[test]
    fn test_reading_for_unknown_wood_is_only_stored() {
        let (mut workbench, tx, handle) = start(FakeApi::default(), &["Oak"]);
        workbench.apply_measurement(Tool::DensityMeter, &wood("Teak"), "0.9 g/cm³");
        assert_eq!(workbench.store.get(&wood("Teak")).unwrap().density, Some(0.9));
        assert!(workbench.calculations.row(&wood("Teak")).is_none());
        assert_eq!(workbench.measurements.rows().len(), 1);
        request_stop(&tx, handle);
    }

    #[test]
    fn test_missing_input_sends_nothing() {
        let api = FakeApi::default();
        let (mut workbench, tx, handle) = start(api.clone(), &["Oak", "Pine", "MDF"]);
        fill(&mut workbench, "Oak", ["0.7", "40", "12"]);
        workbench.apply_measurement(Tool::DensityMeter, &wood("Pine"), "0.5");

        workbench.calculate_property(Property::Hardness);
        assert_eq!(
            workbench.alert.as_deref(),
            Some("Please ensure all measurements are entered for Pine.")
        );
        assert!(workbench.event_queue.is_empty());

        settle(&mut workbench);
        assert!(api.calculation_requests().is_empty());
        assert!(api.plot_requests().is_empty());
        assert!(workbench.calculations.row(&wood("Oak")).unwrap().outputs[0].is_none());
        request_stop(&tx, handle);
    }

    #[test]
    fn test_plot_update_waits_for_every_row() {
        let api = FakeApi::default()
            .failing_for("Pine")
            .delayed_for("MDF", Duration::from_millis(200));
        let (mut workbench, tx, handle) = start(api.clone(), &["Oak", "Pine", "MDF"]);
        fill(&mut workbench, "Oak", ["0.7", "40", "12"]);
        fill(&mut workbench, "Pine", ["0.5", "60", "15"]);
        fill(&mut workbench, "MDF", ["0.8", "20", "10"]);

        workbench.calculate_property(Property::Hardness);
        settle(&mut workbench);

        assert_eq!(api.calculation_requests().len(), 3);
        let plot_requests = api.plot_requests();
        assert_eq!(plot_requests.len(), 1);
        let hardness = &plot_requests[0].hardness;
        assert_eq!(
            hardness.keys().collect::<Vec<_>>(),
            [&wood("MDF"), &wood("Oak")]
        );
        assert!((hardness[&wood("Oak")] - 0.42).abs() < 1e-9);
        assert!(plot_requests[0].moisture_resistance.is_empty());
        assert!(plot_requests[0].tensile_strength.is_empty());

        let outputs = |name: &str| workbench.calculations.row(&wood(name)).unwrap().outputs.clone();
        assert_eq!(outputs("Oak")[0].as_deref(), Some("0.42"));
        assert_eq!(outputs("MDF")[0].as_deref(), Some("0.64"));
        assert_eq!(outputs("Pine")[0], None);
        assert_eq!(outputs("Oak")[1], None);
        request_stop(&tx, handle);
    }

    #[test]
    fn test_unsuccessful_reply_is_left_out() {
        let api = FakeApi::default().rejecting_for("Pine");
        let (mut workbench, tx, handle) = start(api.clone(), &["Oak", "Pine"]);
        fill(&mut workbench, "Oak", ["0.7", "40", "12"]);
        fill(&mut workbench, "Pine", ["0.5", "60", "15"]);

        workbench.calculate_property(Property::Hardness);
        settle(&mut workbench);

        assert_eq!(api.calculation_requests().len(), 2);
        let plot_requests = api.plot_requests();
        assert_eq!(plot_requests.len(), 1);
        assert_eq!(
            plot_requests[0].hardness.keys().collect::<Vec<_>>(),
            [&wood("Oak")]
        );
        let pine = workbench.calculations.row(&wood("Pine")).unwrap();
        assert_eq!(pine.outputs, [None, None, None]);
        request_stop(&tx, handle);
    }

    #[test]
    fn test_tied_readings_round_up_before_sending() {
        let api = FakeApi::default();
        let (mut workbench, tx, handle) = start(api.clone(), &["Oak"]);
        fill(&mut workbench, "Oak", ["0.625 g/cm³", "40%", "12.5%"]);

        let row = workbench.calculations.row(&wood("Oak")).unwrap();
        let texts: Vec<_> = row.inputs.iter().map(|input| input.text.as_str()).collect();
        assert_eq!(texts, ["0.63", "0.40", "0.13"]);

        workbench.calculate_property(Property::TensileStrength);
        settle(&mut workbench);
        let requests = api.calculation_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].density, 0.63);
        assert_eq!(requests[0].moisture, 0.13);
        request_stop(&tx, handle);
    }

    #[test]
    fn test_no_rows_still_updates_plot() {
        let api = FakeApi::default();
        let (mut workbench, tx, handle) = start(api.clone(), &[]);
        workbench.calculate_property(Property::TensileStrength);
        settle(&mut workbench);
        assert!(api.calculation_requests().is_empty());
        assert_eq!(api.plot_requests(), vec![PlotRequest::default()]);
        request_stop(&tx, handle);
    }

    #[test]
    fn test_only_returned_plots_are_reloaded() {
        let api = FakeApi::default().with_plot_urls(PlotUrls {
            hardness: Some("/static_simulation/hardness_plot.png".into()),
            ..Default::default()
        });
        let (mut workbench, tx, handle) = start(api.clone(), &["Oak"]);
        fill(&mut workbench, "Oak", ["0.7", "40", "12"]);

        workbench.calculate_property(Property::Hardness);
        settle(&mut workbench);

        let hardness = workbench.plots.image(Property::Hardness);
        let source = hardness.source().unwrap();
        assert!(source.starts_with("/static_simulation/hardness_plot.png?v="));
        assert!(source.rsplit('=').next().unwrap().parse::<u128>().is_ok());
        assert!(hardness.is_loaded());
        assert_eq!(api.fetched(), vec![source.to_owned()]);

        for property in [Property::MoistureResistance, Property::TensileStrength] {
            assert_eq!(workbench.plots.image(property).source(), None);
        }
        request_stop(&tx, handle);
    }

    #[test]
    fn test_dropping_a_tool_fills_both_tables() {
        let api = FakeApi::default().with_measurement(Tool::DensityMeter, "Oak", "0.70 g/cm³");
        let (mut workbench, tx, handle) = start(api.clone(), &["Pine", "Oak"]);

        workbench.drop_tool(ToolDrop {
            tool: Tool::DensityMeter,
            wood: wood("Oak"),
        });
        settle(&mut workbench);

        assert_eq!(
            api.measurement_requests(),
            vec![MeasurementRequest {
                tool_id: "density_meter".into(),
                wood_type: wood("Oak"),
            }]
        );
        let rows = workbench.measurements.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells, ["0.70 g/cm³", "-", "-"]);

        let input = &workbench.calculations.row(&wood("Oak")).unwrap().inputs[0];
        assert_eq!(input.text, "0.70");
        assert!(input.enabled);
        request_stop(&tx, handle);
    }

    #[test]
    fn test_drop_without_reading_changes_nothing() {
        let (mut workbench, tx, handle) = start(FakeApi::default(), &["Oak"]);
        workbench.drop_tool(ToolDrop {
            tool: Tool::PorosityMeter,
            wood: wood("Oak"),
        });
        settle(&mut workbench);
        assert!(workbench.measurements.rows().is_empty());
        assert!(workbench.store.is_empty());
        request_stop(&tx, handle);
    }

    #[test]
    fn test_reset() {
        let (mut workbench, tx, handle) = start(FakeApi::default(), &["Oak"]);
        fill(&mut workbench, "Oak", ["0.7", "40", "12"]);
        workbench.alert = Some("x".into());
        workbench.reset();

        assert!(workbench.store.is_empty());
        assert!(workbench.measurements.rows().is_empty());
        assert_eq!(workbench.alert, None);
        let row = workbench.calculations.row(&wood("Oak")).unwrap();
        assert!(row.inputs.iter().all(|input| input.text.is_empty() && !input.enabled));
        request_stop(&tx, handle);
    }
}

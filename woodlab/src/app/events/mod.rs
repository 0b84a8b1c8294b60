use std::{path::PathBuf, sync::mpsc::TryRecvError, thread::JoinHandle};

use derive_new::new;

use app_core::{
    backend::{BackendLink, LinkBatch, LinkReceiver, Settled},
    event::{AppEvent, EventState},
};

use crate::{
    api::{ApiError, CalculationReply, MeasurementReply, PlotReply, PlotRequest, PropertyResults},
    app::{
        components::{timestamp_millis, RowInputs, ToolDrop},
        storage::{load_json, save_json},
        DynRequestSender, Workbench,
    },
    wood::{Property, WoodType},
    BackendAppState,
};

// ---------------------------------------------------------------------------
//
//
// EventQueue
//
//
// ---------------------------------------------------------------------------

/// The EventQueue stores events that are processed each iteration
/// of the application GUI event loop.
pub struct EventQueue<App> {
    /// Stores events for later processing.
    queue: Vec<Box<dyn AppEvent<App = App>>>,
    /// Temporarily stores events that have not yet finished running.
    tmp_backlog: Vec<Box<dyn AppEvent<App = App>>>,
}

impl<App> EventQueue<App> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            tmp_backlog: Vec::new(),
        }
    }

    pub fn queue_event(&mut self, event: Box<dyn AppEvent<App = App>>) {
        self.queue.push(event);
    }

    pub fn discard_events(&mut self) {
        self.queue.clear();
        self.tmp_backlog.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len() + self.tmp_backlog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Workbench {
    /// Applies every queued event once. Returns true if any of them
    /// finished.
    pub fn run_events(&mut self) -> bool {
        let mut any_finished = false;
        // Events queued while draining are applied in the same pass.
        while let Some(mut event) = self.event_queue.queue.pop() {
            match event.apply(self) {
                Ok(EventState::Finished) => {
                    any_finished = true;
                }
                Ok(EventState::Busy) => {
                    // Add busy event to the backlog.
                    self.event_queue.tmp_backlog.push(event);
                }
                Err(err) => {
                    log::error!("event failed: {:?}", err)
                }
            }
        }

        // Putting the backlog back in the queue by swapping the
        // vectors.
        std::mem::swap(
            &mut self.event_queue.queue,
            &mut self.event_queue.tmp_backlog,
        );
        any_finished
    }
}

// ---------------------------------------------------------------------------
//
//
// Events
//
//
// ---------------------------------------------------------------------------

/// A tool was dropped on a wood sample; waits for the reading.
pub struct MeasurementRequested {
    drop: ToolDrop,
    reply: LinkReceiver<Result<MeasurementReply, ApiError>>,
}

impl MeasurementRequested {
    pub fn dispatch(drop: ToolDrop, request_tx: &DynRequestSender) -> Self {
        let ToolDrop { tool, wood } = drop.clone();
        let reply = BackendLink::dispatch(
            &format!("measure {wood} with {tool}"),
            move |b: &BackendAppState| b.get_measurement(tool, &wood),
            request_tx,
        );
        Self { drop, reply }
    }
}

/// One calculation request per row, all in flight at once. Once every
/// request settled, the collected results are sent to the plot endpoint.
pub struct CalculationBatch {
    property: Property,
    batch: LinkBatch<WoodType, Result<CalculationReply, ApiError>>,
    results: PropertyResults,
}

impl CalculationBatch {
    pub fn dispatch(property: Property, rows: &[RowInputs], request_tx: &DynRequestSender) -> Self {
        let mut batch = LinkBatch::new();
        for row in rows {
            let request = row.to_request();
            let reply = BackendLink::dispatch(
                &format!("calculate {property} for {}", row.wood),
                move |b: &BackendAppState| b.calculate_properties(&request),
                request_tx,
            );
            batch.push(row.wood.clone(), reply);
        }
        Self {
            property,
            batch,
            results: PropertyResults::new(),
        }
    }
}

/// Asks the server to redraw the plots and points the plot images at
/// the new URLs.
pub struct PlotUpdate {
    reply: LinkReceiver<Result<PlotReply, ApiError>>,
}

impl PlotUpdate {
    pub fn dispatch(request: PlotRequest, request_tx: &DynRequestSender) -> Self {
        let reply = BackendLink::dispatch(
            "update plots",
            move |b: &BackendAppState| b.update_plot(&request),
            request_tx,
        );
        Self { reply }
    }
}

/// Handles both, saving and loading the session, depending on whether
/// `should_save` is true or false.
#[derive(new)]
pub struct SaveLoadRequested {
    should_save: bool,
    thread_handle: Option<JoinHandle<Option<PathBuf>>>,
}

// ---------------------------------------------------------------------------
//
//
// apply()
//
//
// ---------------------------------------------------------------------------

impl AppEvent for MeasurementRequested {
    type App = Workbench;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let ToolDrop { tool, wood } = &self.drop;
        match self.reply.try_recv() {
            Ok(Ok(reply)) => {
                match reply.reading() {
                    Some(raw) => app.apply_measurement(*tool, wood, raw),
                    None => log::debug!("no reading for {wood} with {tool}"),
                }
                Ok(EventState::Finished)
            }
            Ok(Err(err)) => {
                log::warn!("measuring {wood} with {tool} failed: {err}");
                Ok(EventState::Finished)
            }
            Err(TryRecvError::Empty) => Ok(EventState::Busy),
            Err(TryRecvError::Disconnected) => {
                Err(format!("measurement of {wood} with {tool} was dropped"))
            }
        }
    }
}

impl AppEvent for CalculationBatch {
    type App = Workbench;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let property = self.property;
        for (wood, outcome) in self.batch.poll() {
            match outcome {
                Settled::Replied(Ok(reply)) => match reply.value(property) {
                    Some(value) => {
                        if !app.calculations.set_output(&wood, property, value) {
                            log::warn!("no calculation row for {wood} anymore");
                        }
                        self.results.insert(wood, value);
                    }
                    None => log::debug!("server reported no {property} for {wood}"),
                },
                Settled::Replied(Err(err)) => {
                    log::warn!("calculating {property} for {wood} failed: {err}")
                }
                Settled::HungUp => log::warn!("calculating {property} for {wood} was dropped"),
            }
        }

        if !self.batch.is_settled() {
            return Ok(EventState::Busy);
        }

        log::debug!(
            "{property} batch settled, {} of {} rows succeeded",
            self.results.len(),
            self.batch.num_settled()
        );
        let request = PlotRequest::single(property, std::mem::take(&mut self.results));
        let update = PlotUpdate::dispatch(request, &app.request_tx);
        app.event_queue.queue_event(Box::new(update));
        Ok(EventState::Finished)
    }
}

impl AppEvent for PlotUpdate {
    type App = Workbench;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        match self.reply.try_recv() {
            Ok(Ok(reply)) if reply.success => {
                let changed =
                    app.plots
                        .apply_urls(&reply.plot_urls, timestamp_millis(), &app.request_tx);
                log::debug!("{changed} plot(s) updated");
                Ok(EventState::Finished)
            }
            Ok(Ok(_)) => {
                log::warn!("server could not update the plots");
                Ok(EventState::Finished)
            }
            Ok(Err(err)) => {
                log::warn!("updating plots failed: {err}");
                Ok(EventState::Finished)
            }
            Err(TryRecvError::Empty) => Ok(EventState::Busy),
            Err(TryRecvError::Disconnected) => Err("plot update was dropped".to_string()),
        }
    }
}

impl AppEvent for SaveLoadRequested {
    type App = Workbench;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        if let Some(handle) = self.thread_handle.take_if(|handle| handle.is_finished()) {
            match handle.join() {
                Ok(Some(path)) => {
                    if self.should_save {
                        if let Err(err) = save_json(app, Some(path.as_ref())) {
                            log::error!("error while trying to save to {:?}: {:?}", &path, err)
                        };
                    } else if let Err(err) = load_json(app, Some(path.as_ref())) {
                        log::error!("error while trying to load from {:?}: {:?}", &path, err)
                    };
                }
                Ok(None) => (),
                Err(err) => {
                    let msg = if self.should_save { "save" } else { "load" };
                    log::error!("Unable to {} file: {:?}", msg, err)
                }
            };
            Ok(EventState::Finished)
        } else {
            Ok(EventState::Busy)
        }
    }
}

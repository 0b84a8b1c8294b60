use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use log::{debug, info, warn};

use crate::backend::{BackendRequest, BackendState, RequestSender};

/// Receives requests from the UI and runs each of them on its own worker
/// thread, so that slow requests (network calls) do not queue up behind
/// each other.
pub struct BackendEventLoop<S>
where
    S: BackendState,
{
    state: Arc<S>,
    request_rx: Receiver<Box<dyn BackendRequest<S>>>,
    workers: Vec<JoinHandle<()>>,
    spawned: usize,
}

impl<S: BackendState> BackendEventLoop<S> {
    pub fn new(request_rx: Receiver<Box<dyn BackendRequest<S>>>, state: S) -> Self {
        info!("creating new event loop");
        Self {
            state: Arc::new(state),
            request_rx,
            workers: Vec::new(),
            spawned: 0,
        }
    }

    pub fn run(mut self) -> JoinHandle<()> {
        std::thread::spawn(move || {
            // `recv` fails once every sender is gone, which also ends the loop.
            while let Ok(request) = self.request_rx.recv() {
                if request.stops_event_loop() {
                    info!("stopping backend event loop");
                    self.join_workers();
                    request.run_on_backend(&self.state);
                    return;
                }
                self.spawn_worker(request);
            }
            info!("all request senders hung up, stopping backend event loop");
            self.join_workers();
        })
    }

    fn spawn_worker(&mut self, request: Box<dyn BackendRequest<S>>) {
        self.workers.retain(|worker| !worker.is_finished());

        let description = request.describe().to_owned();
        if request.is_cancelled() {
            debug!("skipping cancelled request '{description}'");
            return;
        }
        debug!("handling request '{description}'");

        let state = Arc::clone(&self.state);
        let spawned = std::thread::Builder::new()
            .name(format!("backend-worker-{}", self.spawned))
            .spawn(move || request.run_on_backend(&state));
        self.spawned += 1;
        match spawned {
            Ok(handle) => self.workers.push(handle),
            // The request is dropped with the closure, so its receiver
            // sees a disconnect.
            Err(err) => warn!("unable to spawn worker for request '{description}': {err}"),
        }
    }

    fn join_workers(&mut self) {
        for worker in self.workers.drain(..) {
            if let Err(err) = worker.join() {
                warn!("backend worker panicked: {err:?}");
            }
        }
    }
}

struct StopSignal {
    backchannel: Sender<()>,
}

impl<S: BackendState> BackendRequest<S> for StopSignal {
    fn run_on_backend(self: Box<Self>, _backend: &S) {
        let _ = self.backchannel.send(());
    }
    fn describe(&self) -> &str {
        "try end event loop"
    }
    fn is_cancelled(&self) -> bool {
        false
    }
    fn stops_event_loop(&self) -> bool {
        true
    }
}

/// Asks the event loop to stop once all running requests finished and
/// joins its thread.
pub fn request_stop<S: BackendState>(
    request_tx: &RequestSender<S>,
    backend_thread_handle: JoinHandle<()>,
) {
    let (tx, rx) = channel();
    info!("sending signal to end backend event loop");
    if request_tx.send(Box::new(StopSignal { backchannel: tx })).is_ok() {
        if let Err(e) = rx.recv_timeout(std::time::Duration::from_secs(10)) {
            warn!("did not receive a response after 10 seconds: {e}");
        };
    };
    match backend_thread_handle.join() {
        Ok(_) => info!("backend event loop ended"),
        Err(e) => warn!("failed to signal event loop to stop: {e:?}"),
    }
}

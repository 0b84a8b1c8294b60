use log::{debug, error, trace};
use std::{
    marker::PhantomData,
    sync::{
        atomic::{AtomicBool, Ordering::SeqCst},
        mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError},
        Arc,
    },
};

use crate::{
    backend::{BackendState, RequestSender},
    frontend::UIParameter,
    BACKEND_HUNG_UP_MSG,
};

/// The linker is send to the backend and replies once the action ran
/// on one of the backend workers.
pub struct BackendLink<T, F, S>
where
    F: FnOnce(&S) -> T,
    S: BackendState,
{
    backchannel: Sender<T>,
    action: F,
    is_cancelled: Arc<AtomicBool>,
    description: String,
    _marker: PhantomData<fn(&S)>,
}

impl<T, F, S> BackendLink<T, F, S>
where
    F: FnOnce(&S) -> T + Send + 'static,
    T: Send + 'static,
    S: BackendState,
{
    pub fn new(description: &str, action: F) -> (LinkReceiver<T>, Self) {
        let (tx, rx) = channel();
        let is_cancelled = Arc::new(AtomicBool::new(false));
        let rx = LinkReceiver {
            rx,
            is_cancelled: is_cancelled.clone(),
        };
        (
            rx,
            Self {
                backchannel: tx,
                action,
                description: description.to_owned(),
                is_cancelled,
                _marker: PhantomData,
            },
        )
    }

    /// Sends `action` to the backend and hands back the receiver for its
    /// result. If the backend is gone, the receiver reports a disconnect.
    pub fn dispatch(
        description: &str,
        action: F,
        request_tx: &RequestSender<S>,
    ) -> LinkReceiver<T> {
        let (rx, linker) = Self::new(description, action);
        debug!("dispatching request '{description}'");
        if request_tx.send(Box::new(linker)).is_err() {
            error!("{BACKEND_HUNG_UP_MSG} (request '{description}')");
        }
        rx
    }

    pub fn request_parameter_update(
        param: &mut UIParameter<T>,
        description: &str,
        action: F,
        request_tx: &RequestSender<S>,
    ) where
        T: Clone,
    {
        param.set_recv(Self::dispatch(description, action, request_tx));
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.load(SeqCst)
    }
}

pub trait BackendRequest<S>: Send
where
    S: BackendState,
{
    fn run_on_backend(self: Box<Self>, backend: &S);
    fn describe(&self) -> &str;
    fn is_cancelled(&self) -> bool;
    fn stops_event_loop(&self) -> bool {
        false
    }
}

impl<T, F, S> BackendRequest<S> for BackendLink<T, F, S>
where
    F: FnOnce(&S) -> T + Send + 'static,
    S: BackendState,
    T: Send + 'static,
{
    fn run_on_backend(self: Box<Self>, backend: &S) {
        if self.is_cancelled.load(SeqCst) {
            return;
        }
        let Self {
            backchannel,
            action,
            is_cancelled,
            description,
            ..
        } = *self;
        let result = action(backend);
        // the receiver may have been dropped while `action` was running
        if !is_cancelled.load(SeqCst) && backchannel.send(result).is_err() {
            debug!("Trying to send reply for request '{description}' on closed channel.");
        }
    }
    fn describe(&self) -> &str {
        &self.description
    }
    fn is_cancelled(&self) -> bool {
        self.is_cancelled.load(SeqCst)
    }
}

pub struct LinkReceiver<T> {
    rx: Receiver<T>,
    is_cancelled: Arc<AtomicBool>,
}

impl<T> std::fmt::Debug for LinkReceiver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkReceiver")
            .field("is_cancelled", &self.is_cancelled.load(SeqCst))
            .finish()
    }
}

impl<T> LinkReceiver<T> {
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.rx.try_recv()
    }
    pub fn recv_timeout(&self, duration: std::time::Duration) -> Result<T, RecvTimeoutError> {
        self.rx.recv_timeout(duration)
    }
}

impl<T> Drop for LinkReceiver<T> {
    fn drop(&mut self) {
        trace!("dropping link receiver");
        self.is_cancelled.store(true, SeqCst);
    }
}

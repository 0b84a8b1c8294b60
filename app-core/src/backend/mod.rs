mod backend_link;
mod batch;
mod eventloop;

use std::sync::mpsc::Sender;

pub use self::{
    backend_link::{BackendLink, BackendRequest, LinkReceiver},
    batch::{LinkBatch, Settled},
    eventloop::{request_stop, BackendEventLoop},
};

/// State shared by all requests running on the backend. Requests run
/// concurrently, so the state is only ever borrowed immutably.
pub trait BackendState: Send + Sync + 'static {}

pub type RequestSender<S> = Sender<Box<dyn BackendRequest<S>>>;

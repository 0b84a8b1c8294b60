use std::sync::mpsc::TryRecvError;

use log::warn;

use crate::backend::LinkReceiver;

/// A value shown in the UI that may be waiting for a fresh value from the
/// backend. Until the reply arrives the old value stays visible.
#[derive(Debug)]
pub struct UIParameter<T> {
    pending_update_rx: Option<LinkReceiver<T>>,
    value: T,
}

impl<T: Clone> Clone for UIParameter<T> {
    fn clone(&self) -> Self {
        Self {
            pending_update_rx: None,
            value: self.value.clone(),
        }
    }
}

impl<T: Default + Clone> Default for UIParameter<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> UIParameter<T> {
    pub fn new(val: T) -> Self {
        UIParameter {
            pending_update_rx: None,
            value: val,
        }
    }

    /// Returns true if the value changed (or the backend hung up), i.e. if
    /// the UI should be redrawn.
    pub fn try_update(&mut self) -> bool {
        let Some(rx) = &self.pending_update_rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(val) => {
                self.value = val;
                self.pending_update_rx = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                warn!("Tried to receive message from closed channel.");
                self.pending_update_rx = None;
                true
            }
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        self.pending_update_rx.is_none()
    }

    /// Replaces any pending update; the previous request is cancelled when
    /// its receiver is dropped.
    pub fn set_recv(&mut self, rx: LinkReceiver<T>) {
        self.pending_update_rx = Some(rx);
    }

    pub fn set(&mut self, val: T) {
        self.pending_update_rx = None;
        self.value = val;
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

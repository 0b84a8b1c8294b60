/// Whether an event is done or has to be applied again on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventState {
    Finished,
    Busy,
}

/// Something that mutates the app and may have to wait for the backend
/// before it is done.
pub trait AppEvent {
    type App;
    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String>;
}

#![warn(clippy::all, rust_2018_idioms)]

pub mod api;
mod app;
mod backend_state;
pub mod wood;

pub use app::config::Config;
pub use app::storage;
pub use app::{EguiApp, Workbench};
pub use backend_state::BackendAppState;

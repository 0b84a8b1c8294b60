#![warn(clippy::all, rust_2018_idioms)]

pub mod backend;
pub mod event;
pub mod frontend;
pub mod storage;
pub mod string_error;

pub const BACKEND_HUNG_UP_MSG: &str = "backend event loop is not reachable anymore";

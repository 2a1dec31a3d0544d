//! Client-side orchestration for the dispatcher control panel: operator
//! actions per channel, the HTTP requests behind them and how their outcomes
//! are reported.

pub mod command;
pub mod controller;
pub mod display;
pub mod error;
pub mod query;
pub mod transport;

pub use command::CommandClient;
pub use controller::{ChannelController, ControlPanel};
pub use display::{DisplayCell, DisplaySlot, DisplayState};
pub use error::{BaseUrlError, DispatchError};
pub use query::QueryClient;
pub use transport::Dispatcher;

/// Base location used when nothing else is configured.
pub const DEFAULT_DISPATCHER_URL: &str = "http://localhost:8085/dispatcher-app";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Error,
}

/// Operator-facing notifications published by the command and query clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    Alert { level: AlertLevel, text: String },
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

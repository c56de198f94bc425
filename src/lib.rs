pub mod config;
pub mod error;
mod event;
pub mod gateway;
mod log;

pub use error::GatewayError;
pub use event::{Event, EventDraft, HEADER_VALUE_SEPARATOR};
pub use gateway::{AppState, router};
pub use log::{DEFAULT_CAPACITY, EventLog};

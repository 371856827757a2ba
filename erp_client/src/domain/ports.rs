use async_trait::async_trait;
use chrono::NaiveTime;

use crate::domain::errors::TransportError;
use crate::domain::log::{LogEntry, Severity};
use crate::domain::request::{PreparedRequest, TransportResponse};

// The use cases depend on these traits, not the concrete adapters.
// Dependencies point inwards to the domain layer.

// Port for sending a prepared request over the network.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse, TransportError>;
}

// Port for reporting the outcome of an API call.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str, severity: Severity);
}

// Port for the append-only log panel. New entries go on top.
pub trait LogPanel: Send + Sync {
    fn prepend(&self, entry: LogEntry);
}

// Port for retrieving the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now_local_time(&self) -> NaiveTime;
}

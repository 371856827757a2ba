mod envelope;
mod errors;
mod log;
mod ports;
mod request;

// Re-export the domain boundary types and ports.
pub use envelope::{ApiErrorPayload, ErrorCode, PageInfo, PageResponse, ResponseEnvelope};
pub use errors::{ApiClientError, ApiError, TransportError, UNKNOWN_API_ERROR_MESSAGE};
pub use log::{LogColor, LogEntry, Severity};
pub use ports::{Clock, HttpTransport, LogPanel, LogSink};
pub use request::{PreparedRequest, RequestBody, RequestOptions, TransportResponse};

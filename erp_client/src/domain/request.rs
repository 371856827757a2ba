use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

// The serialization within this layer is a dependency leak, but its a pragmatic approach.
// Body handed to the API client by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    // Serialized to JSON text before sending.
    Json(Value),
    // Sent unchanged.
    Text(String),
}

impl RequestBody {
    // JSON null means no body; a JSON string is sent as raw text.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(RequestBody::Text(text)),
            other => Some(RequestBody::Json(other)),
        }
    }

    pub fn into_text(self) -> Result<String, serde_json::Error> {
        match self {
            RequestBody::Json(value) => serde_json::to_string(&value),
            RequestBody::Text(text) => Ok(text),
        }
    }
}

// Caller-side options for a single API call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    // Defaults to GET.
    pub method: Option<Method>,
    // Merged over the default `Content-Type: application/json`.
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    pub fn method_or_default(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_json(mut self, value: Value) -> Self {
        self.body = RequestBody::from_value(value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(text.into()));
        self
    }
}

// Fully resolved request as it goes over the wire.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

// Raw response; the envelope is decoded by the caller regardless of status.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

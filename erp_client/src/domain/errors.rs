use crate::domain::envelope::{ApiErrorPayload, ErrorCode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

// Used when a failed envelope carries no message.
pub const UNKNOWN_API_ERROR_MESSAGE: &str = "An unknown API error occurred.";

// Business failure reported inside a structurally valid response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn known_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(&self.code)
    }

    // Per-field validation messages, from either `details.fields` or a flat `details` map.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let Some(Value::Object(details)) = &self.details else {
            return BTreeMap::new();
        };
        let fields = match details.get("fields") {
            Some(Value::Object(fields)) => fields,
            _ => details,
        };

        fields
            .iter()
            .filter_map(|(field, message)| {
                message
                    .as_str()
                    .map(|message| (field.clone(), message.to_string()))
            })
            .collect()
    }
}

impl From<ApiErrorPayload> for ApiError {
    fn from(payload: ApiErrorPayload) -> Self {
        let message = payload
            .message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| UNKNOWN_API_ERROR_MESSAGE.to_string());

        Self {
            code: payload.code,
            message,
            details: payload.details,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for ApiError {}

// Opaque transport failure; the original cause is kept as-is.
#[derive(Debug)]
pub struct TransportError(Box<dyn Error + Send + Sync>);

impl TransportError {
    pub fn new(cause: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self(cause.into())
    }

    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn Error + Send + Sync> {
        self.0
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

#[derive(Debug)]
pub enum ApiClientError {
    // Envelope reported `success: false`.
    Business(ApiError),
    // The request never produced a response body.
    Transport(TransportError),
    // The body was not JSON, not an envelope, or `data` did not fit the target type.
    Decode(serde_json::Error),
}

impl ApiClientError {
    // Message of the underlying failure, without the variant prefix.
    pub fn cause_message(&self) -> String {
        match self {
            ApiClientError::Business(err) => err.message.clone(),
            ApiClientError::Transport(err) => err.to_string(),
            ApiClientError::Decode(err) => err.to_string(),
        }
    }

    pub fn as_business(&self) -> Option<&ApiError> {
        match self {
            ApiClientError::Business(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiClientError::Business(err) => write!(f, "api error {err}"),
            ApiClientError::Transport(err) => write!(f, "api transport error: {err}"),
            ApiClientError::Decode(err) => write!(f, "api response decode error: {err}"),
        }
    }
}

impl Error for ApiClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiClientError::Business(err) => Some(err),
            ApiClientError::Transport(err) => Some(err.get_ref()),
            ApiClientError::Decode(err) => Some(err),
        }
    }
}

impl From<ApiError> for ApiClientError {
    fn from(err: ApiError) -> Self {
        ApiClientError::Business(err)
    }
}

impl From<TransportError> for ApiClientError {
    fn from(err: TransportError) -> Self {
        ApiClientError::Transport(err)
    }
}

impl From<serde_json::Error> for ApiClientError {
    fn from(err: serde_json::Error) -> Self {
        ApiClientError::Decode(err)
    }
}

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    ApiClientError, ApiError, HttpTransport, LogSink, PreparedRequest, RequestOptions,
    ResponseEnvelope, Severity, TransportError,
};

// API call use case with injected transport and log sink.
// Every call writes exactly one entry to the sink before returning.
pub struct FetchApi<T, L> {
    pub transport: T,
    pub sink: L,
    // Relative URLs are joined onto this; absolute URLs are used as-is.
    pub base_url: Option<Url>,
}

impl<T, L> FetchApi<T, L>
where
    T: HttpTransport,
    L: LogSink,
{
    pub fn new(transport: T, sink: L) -> Self {
        Self {
            transport,
            sink,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sends the request and unwraps the `{success, data, error}` envelope.
    ///
    /// Returns the envelope's `data` decoded into `D` (a missing `data` is
    /// decoded from JSON null, so `()` and `Option<_>` work for empty replies).
    /// HTTP status codes are not inspected; only the envelope decides.
    #[tracing::instrument(
        name = "fetch_api",
        skip_all,
        fields(method = %options.method_or_default(), url = %url)
    )]
    pub async fn fetch<D>(&self, url: &str, options: RequestOptions) -> Result<D, ApiClientError>
    where
        D: DeserializeOwned,
    {
        let method = options.method_or_default();

        match self.execute(url, options).await {
            Ok(data) => {
                self.sink.log(&format!("{method} {url}"), Severity::Success);
                debug!("api call succeeded.");
                Ok(data)
            }
            Err(ApiClientError::Business(err)) => {
                self.sink
                    .log(&format!("[{}] {}", err.code, err.message), Severity::Error);
                warn!(code = %err.code, message = %err.message, "api returned a business error.");
                Err(ApiClientError::Business(err))
            }
            Err(err) => {
                self.sink.log(
                    &format!("Network or parsing error for {url}. {}", err.cause_message()),
                    Severity::Error,
                );
                warn!(error = %err, "api call failed before an envelope was read.");
                Err(err)
            }
        }
    }

    /// Like [`FetchApi::fetch`] with default options (GET, no body).
    pub async fn get<D>(&self, url: &str) -> Result<D, ApiClientError>
    where
        D: DeserializeOwned,
    {
        self.fetch(url, RequestOptions::default()).await
    }

    async fn execute<D>(&self, url: &str, options: RequestOptions) -> Result<D, ApiClientError>
    where
        D: DeserializeOwned,
    {
        let request = self.prepare(url, options)?;
        let response = self.transport.send(request).await?;
        debug!(status = %response.status, bytes = response.body.len(), "response received.");

        let envelope: ResponseEnvelope<Value> = serde_json::from_slice(&response.body)?;
        if envelope.success {
            let data = envelope.data.unwrap_or(Value::Null);
            return Ok(serde_json::from_value(data)?);
        }

        match envelope.error {
            Some(payload) => Err(ApiClientError::Business(ApiError::from(payload))),
            None => Err(ApiClientError::Decode(serde_json::Error::custom(
                "envelope reported failure without an error payload",
            ))),
        }
    }

    fn prepare(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<PreparedRequest, ApiClientError> {
        let method = options.method_or_default();
        let url = self.resolve(url)?;

        // Caller headers replace the default for the same name.
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(options.headers);

        let body = options.body.map(|body| body.into_text()).transpose()?;

        Ok(PreparedRequest {
            method,
            url,
            headers,
            body,
        })
    }

    fn resolve(&self, url: &str) -> Result<Url, ApiClientError> {
        let resolved = match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        resolved.map_err(|err| ApiClientError::Transport(TransportError::new(err)))
    }
}

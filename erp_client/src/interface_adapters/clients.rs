use crate::domain::{HttpTransport, PreparedRequest, TransportError, TransportResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// The clients defined here are for reqwest clients to communicate with the ERP backend.
// Thin wrapper around reqwest; envelope handling lives in the fetch use case.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let res = builder.send().await.map_err(TransportError::new)?;
        let status = res.status();

        // Non-2xx bodies still carry the envelope, so read them the same way.
        let body = res.bytes().await.map_err(TransportError::new)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

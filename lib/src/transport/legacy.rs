use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::api::{self, Payload, ServerReply};
use crate::error::Error;
use crate::transport::{Transport, TransportFuture};

// Request timeout, in seconds
pub(crate) const LEGACY_REQUEST_TIMEOUT: u64 = 30;

/// Last-resort transport: a blocking client on a dedicated thread.
/// Unlike the direct transport it only accepts 200/201, matching the
/// synchronous request path it replaces.
pub struct LegacyTransport {
    endpoint: String,
}

impl LegacyTransport {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }
}

impl Transport for LegacyTransport {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn deliver<'a>(&'a self, payload: &'a Payload) -> TransportFuture<'a> {
        let endpoint = self.endpoint.clone();
        let body = serde_json::to_string(payload);

        Box::pin(async move {
            let body = body?;

            // The blocking client may not be built or driven on a runtime
            // thread, so the whole attempt moves to the blocking pool.
            let handle =
                tokio::task::spawn_blocking(move || -> Result<(StatusCode, String), Error> {
                    let client = reqwest::blocking::Client::builder()
                        .timeout(Duration::from_secs(LEGACY_REQUEST_TIMEOUT))
                        .build()?;

                    let resp = client
                        .post(reqwest::Url::parse(&endpoint)?)
                        .header(CONTENT_TYPE, "application/json")
                        .body(body)
                        .send()?;

                    let status = resp.status();
                    let text = resp.text()?;

                    Ok((status, text))
                });

            let (status, text) = handle
                .await
                .map_err(|e| Error::Network(e.to_string()))??;

            if status != StatusCode::OK && status != StatusCode::CREATED {
                return Err(api::server_error(status.as_u16(), &text));
            }

            Ok(ServerReply::from_body(&text))
        })
    }
}

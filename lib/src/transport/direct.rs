use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::api::{self, Payload, ServerReply};
use crate::transport::{Transport, TransportFuture};

// Request timeout, in seconds
pub(crate) const DIRECT_REQUEST_TIMEOUT: u64 = 30;

/// Posts the payload straight to the configured endpoint.
pub struct DirectTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl DirectTransport {
    pub fn new(endpoint: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DIRECT_REQUEST_TIMEOUT))
            .build()
            .unwrap();
        Self {
            endpoint: endpoint.to_string(),
            client,
        }
    }
}

impl Transport for DirectTransport {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn deliver<'a>(&'a self, payload: &'a Payload) -> TransportFuture<'a> {
        Box::pin(async move {
            let body = serde_json::to_string(payload)?;

            let resp = self
                .client
                .post(reqwest::Url::parse(&self.endpoint)?)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;

            let status = resp.status();
            let text = resp.text().await?;

            if !status.is_success() {
                return Err(api::server_error(status.as_u16(), &text));
            }

            Ok(ServerReply::from_body(&text))
        })
    }
}

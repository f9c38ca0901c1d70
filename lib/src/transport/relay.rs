use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::api::{self, Payload, ServerReply};
use crate::error::Error;
use crate::transport::{with_deadline, Transport, TransportFuture};

// Deadline for a single relay attempt, in seconds. Shorter than the
// client-level timeout so a stuck relay cannot eat the whole budget.
pub(crate) const RELAY_ATTEMPT_TIMEOUT: u64 = 25;

// Client-level request timeout, in seconds
pub(crate) const RELAY_REQUEST_TIMEOUT: u64 = 30;

/// How a relay folds the wrapped endpoint into its own URL.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(from = "String")]
pub enum RelayKind {
    /// `<base>?url=<percent-encoded endpoint>`
    QueryParam,
    /// `<base>?<percent-encoded endpoint>`
    BareQuery,
    /// `<base><endpoint>`, no encoding
    PathSuffix,
}

impl From<String> for RelayKind {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&str> for RelayKind {
    fn from(s: &str) -> Self {
        if s == "query_param" {
            Self::QueryParam
        } else if s == "bare_query" {
            Self::BareQuery
        } else if s == "path_suffix" {
            Self::PathSuffix
        } else {
            // Default to query-parameter wrapping
            Self::QueryParam
        }
    }
}

/// A single forwarding relay in front of the mail endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct Relay {
    pub name: String,
    pub base: String,
    pub kind: RelayKind,
}

impl Relay {
    /// Build the relay URL wrapping the target endpoint.
    pub fn wrap(&self, endpoint: &str) -> Result<reqwest::Url, Error> {
        let url = match self.kind {
            RelayKind::QueryParam => {
                let mut url = reqwest::Url::parse(&self.base)?;
                url.query_pairs_mut().append_pair("url", endpoint);
                url
            }
            RelayKind::BareQuery => {
                let encoded: String =
                    url::form_urlencoded::byte_serialize(endpoint.as_bytes()).collect();
                reqwest::Url::parse(&format!("{}?{}", self.base, encoded))?
            }
            RelayKind::PathSuffix => reqwest::Url::parse(&format!("{}{}", self.base, endpoint))?,
        };

        Ok(url)
    }
}

/// Tries each configured relay in order until one delivers the payload.
/// The relay list is fixed at construction; order matters.
pub struct RelayTransport {
    endpoint: String,
    relays: Vec<Relay>,
    client: reqwest::Client,
}

impl RelayTransport {
    pub fn new(endpoint: &str, relays: Vec<Relay>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(RELAY_REQUEST_TIMEOUT))
            .build()
            .unwrap();
        Self {
            endpoint: endpoint.to_string(),
            relays,
            client,
        }
    }

    async fn attempt(&self, relay: &Relay, payload: &Payload) -> Result<ServerReply, Error> {
        let url = relay.wrap(&self.endpoint)?;
        let body = serde_json::to_string(payload)?;

        let resp = self
            .client
            .post(url)
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
    }
}

impl Transport for RelayTransport {
    fn name(&self) -> &'static str {
        "relay"
    }

    fn deliver<'a>(&'a self, payload: &'a Payload) -> TransportFuture<'a> {
        Box::pin(async move {
            let deadline = Duration::from_secs(RELAY_ATTEMPT_TIMEOUT);
            let mut last_err: Option<Error> = None;

            for relay in &self.relays {
                match with_deadline(deadline, self.attempt(relay, payload)).await {
                    Ok(reply) => return Ok(reply),
                    Err(e) => {
                        log::warn!("Relay {} failed: {}", relay.name, e);
                        last_err = Some(e);
                    }
                }
            }

            Err(last_err
                .unwrap_or_else(|| Error::Network("No relay endpoints configured".to_string())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://mail.example.com/api/send?key=1";

    #[test]
    fn test_query_param_wrapping_encodes_endpoint() {
        let relay = Relay {
            name: "allorigins".to_string(),
            base: "https://api.allorigins.win/raw".to_string(),
            kind: RelayKind::QueryParam,
        };

        let url = relay.wrap(ENDPOINT).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fmail.example.com%2Fapi%2Fsend%3Fkey%3D1"
        );
    }

    #[test]
    fn test_bare_query_wrapping_encodes_endpoint() {
        let relay = Relay {
            name: "corsproxy".to_string(),
            base: "https://corsproxy.io/".to_string(),
            kind: RelayKind::BareQuery,
        };

        let url = relay.wrap(ENDPOINT).unwrap();
        assert_eq!(
            url.as_str(),
            "https://corsproxy.io/?https%3A%2F%2Fmail.example.com%2Fapi%2Fsend%3Fkey%3D1"
        );
    }

    #[test]
    fn test_path_suffix_wrapping_is_verbatim() {
        let relay = Relay {
            name: "yacdn".to_string(),
            base: "https://yacdn.org/proxy/".to_string(),
            kind: RelayKind::PathSuffix,
        };

        let url = relay.wrap("https://mail.example.com/api/send").unwrap();
        assert_eq!(
            url.as_str(),
            "https://yacdn.org/proxy/https://mail.example.com/api/send"
        );
    }
}

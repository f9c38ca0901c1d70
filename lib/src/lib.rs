pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod state;
pub mod transport;

pub use crate::error::Error;

use crate::api::{Outcome, Payload, ServerReply};
use crate::config::Config;
use crate::form::FormFields;
use crate::transport::direct::DirectTransport;
use crate::transport::legacy::LegacyTransport;
use crate::transport::relay::RelayTransport;
use crate::transport::Transport;

/// Chain-level failure message, used when no transport error was captured.
pub const ALL_METHODS_FAILED: &str = "All request methods failed. Please try again later.";

/// Validates a form submission and drives it through the transport chain.
pub struct SubmissionController {
    config: Config,
}

impl SubmissionController {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Validate the form and deliver it to the mail endpoint.
    ///
    /// An `Ok(Outcome)` means some transport got a reply through; the
    /// reply itself may still report failure. An `Err` means the fields
    /// were invalid or every transport failed.
    pub async fn submit(&self, fields: FormFields) -> Result<Outcome, Error> {
        let fields = fields.validate()?;
        let payload = Payload::new(&self.config, &fields);

        let transports: Vec<Box<dyn Transport + Send + Sync>> = vec![
            Box::new(DirectTransport::new(&self.config.endpoint)),
            Box::new(RelayTransport::new(
                &self.config.endpoint,
                self.config.relays.clone(),
            )),
            Box::new(LegacyTransport::new(&self.config.endpoint)),
        ];

        let reply = deliver(&payload, &transports).await?;

        Ok(Outcome::from(reply))
    }
}

/// Try each transport in order, stopping at the first that gets a reply
/// through. Transport errors fall through to the next strategy; once the
/// list is exhausted the most recent error is surfaced.
pub async fn deliver(
    payload: &Payload,
    transports: &[Box<dyn Transport + Send + Sync>],
) -> Result<ServerReply, Error> {
    let mut last_err: Option<Error> = None;

    for transport in transports {
        match transport.deliver(payload).await {
            Ok(reply) => {
                log::info!("Delivered via {} transport", transport.name());
                return Ok(reply);
            }
            Err(e) => {
                log::warn!("Transport {} failed: {}", transport.name(), e);
                last_err = Some(e);
            }
        }
    }

    let msg = last_err
        .map(|e| e.to_string())
        .unwrap_or_else(|| ALL_METHODS_FAILED.to_string());

    Err(Error::AllTransportsFailed(msg))
}

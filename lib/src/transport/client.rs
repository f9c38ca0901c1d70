use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::api::{Payload, ServerReply};
use crate::error::Error;

// Definition of future types for async use
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<ServerReply, Error>> + Send + 'a>>;

/// One concrete way of getting the payload to the mail endpoint.
pub trait Transport {
    /// Name used when logging fallback decisions.
    fn name(&self) -> &'static str;

    fn deliver<'a>(&'a self, payload: &'a Payload) -> TransportFuture<'a>;
}

/// Race a delivery attempt against a fixed deadline. A missed deadline
/// aborts the attempt and yields `Error::Timeout`.
pub(crate) async fn with_deadline<F>(duration: Duration, attempt: F) -> Result<ServerReply, Error>
where
    F: Future<Output = Result<ServerReply, Error>>,
{
    match tokio::time::timeout(duration, attempt).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout),
    }
}

pub mod direct;
pub mod legacy;
pub mod relay;

mod client;

pub use client::{Transport, TransportFuture};
pub(crate) use client::with_deadline;

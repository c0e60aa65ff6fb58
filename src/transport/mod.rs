//! Validator Transport
//!
//! Sends an `OutboundRequest` and hands back the raw response body.

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use thiserror::Error;

use crate::request::OutboundRequest;
use crate::response::ParseError;

/// Anything that keeps a usable response from arriving
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("validator answered with HTTP {0}")]
    Status(u16),
    #[error(transparent)]
    Malformed(#[from] ParseError),
}

#[async_trait]
pub trait ValidatorTransport: Send + Sync {
    async fn send(&self, request: &OutboundRequest) -> Result<String, TransportError>;
}

//! The HTTP client capability consumed by `send`.
//!
//! # Design
//! `Transport` is the seam between the builder and the platform HTTP
//! client: it receives a materialized `WireRequest` and performs one
//! blocking round-trip. The default implementation wraps a `ureq::Agent`
//! with status-as-error disabled, so 4xx/5xx responses come back as data
//! and only network-level failures surface as errors. Tests substitute
//! in-memory transports through the same trait.

use std::io::Read;

use ureq::Agent;

use crate::body::Body;
use crate::error::RequestError;
use crate::param::Param;
use crate::wire::{WireRequest, WireResponse};

/// A synchronous, blocking HTTP executor.
pub trait Transport {
    fn execute(&self, request: WireRequest) -> Result<WireResponse, RequestError>;
}

/// Default `Transport` backed by a `ureq::Agent`.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Wrap a preconfigured agent.
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: WireRequest) -> Result<WireResponse, RequestError> {
        let mut builder = http::Request::builder()
            .method(request.method)
            .uri(request.url.as_str());
        for param in &request.headers {
            builder = builder.header(param.key.as_str(), param.value.as_str());
        }
        let native = builder
            .body(request.body.unwrap_or_default())
            .map_err(|e| RequestError::InvalidRequest(e.to_string()))?;

        let mut response = self
            .agent
            .run(native)
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                Param::new(name.as_str(), String::from_utf8_lossy(value.as_bytes()))
            })
            .collect();

        // The body is fully buffered before the connection is released.
        let mut bytes = Vec::new();
        response
            .body_mut()
            .as_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Ok(WireResponse {
            status,
            headers,
            body: Some(Body::from(bytes)),
        })
    }
}

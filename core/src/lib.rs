//! Fluent, synchronous HTTP request builder.
//!
//! # Overview
//! Assemble a request (method, URL, headers, query parameters, body), call
//! `send`, and get back a normalized [`Response`] with status code,
//! duration, headers, and the body stream. Everything below the builder —
//! connections, TLS, redirects, timeouts — is delegated to the platform
//! HTTP client behind the [`Transport`] trait.
//!
//! # Design
//! - `Request` is a single-writer builder; `send` consumes it.
//! - Building is split from executing: `materialize` produces a plain-data
//!   [`WireRequest`], and any [`Transport`] can run it. Unit tests swap in
//!   in-memory transports; the default is a `ureq` agent.
//! - Headers and query parameters are ordered lists that allow duplicates;
//!   query strings are re-encoded in canonical sorted form at
//!   materialization.
//! - Every failure class is an explicit [`RequestError`] variant; nothing
//!   fails silently.

pub mod body;
pub mod error;
pub mod param;
pub mod request;
pub mod response;
pub mod transport;
pub mod wire;

pub use body::Body;
pub use error::RequestError;
pub use param::Param;
pub use request::Request;
pub use response::Response;
pub use transport::{Transport, UreqTransport};
pub use wire::{WireRequest, WireResponse};

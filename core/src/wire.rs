//! Plain-data types at the transport boundary.
//!
//! # Design
//! A `WireRequest` is the materialized form of a builder: validated method,
//! parsed URL with a canonical query string, headers in insertion order,
//! and the body drained to bytes. A `WireResponse` is what a transport
//! hands back before timing information is attached. Both are plain owned
//! data so transports can be swapped without lifetime concerns.

use http::Method;
use url::Url;

use crate::body::Body;
use crate::param::Param;

/// A fully materialized outbound request, ready for a `Transport`.
#[derive(Debug)]
pub struct WireRequest {
    pub method: Method,
    pub url: Url,
    /// Insertion order preserved, duplicates allowed.
    pub headers: Vec<Param>,
    pub body: Option<Vec<u8>>,
}

/// The raw outcome of a round-trip, as seen by a `Transport`.
#[derive(Debug)]
pub struct WireResponse {
    pub status: u16,
    pub headers: Vec<Param>,
    pub body: Option<Body>,
}

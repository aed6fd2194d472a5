//! The normalized outcome of an executed request.

use std::time::Duration;

use crate::body::Body;
use crate::param::Param;

/// Status, timing, headers, and body of a completed round-trip.
///
/// Pure data: constructed by the send path, owned by the caller afterward.
/// The caller is responsible for draining or dropping the body stream.
#[derive(Debug)]
pub struct Response {
    pub status_code: u16,
    /// Wall-clock time from materialization start to response receipt.
    pub duration: Duration,
    pub body: Option<Body>,
    pub headers: Vec<Param>,
}

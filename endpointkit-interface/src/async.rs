//! Async transport interface.
//!
//! An async transport should not assume a particular runtime is driving it. The returned futures
//! must be `Send` so callers can spawn them on any multi-threaded executor.

use std::fmt;
use std::future::Future;

use crate::{Request, Result};

/// Executes prepared requests asynchronously.
pub trait AsyncTransport: Send + Sync {
    /// The response type produced by this transport.
    type Response: Send;

    /// Provides a textual description of this transport.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AsyncTransport")
    }

    /// Sends the request and returns a future resolving to the response.
    fn send(&self, req: Request) -> impl Future<Output = Result<Self::Response>> + Send;
}

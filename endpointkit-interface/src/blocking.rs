//! Blocking transport interface.
//!
//! Transports that execute requests on the calling thread implement [`BlockingTransport`]. The
//! endpointkit facade only prepares requests; what a response looks like is entirely up to the
//! transport.

use std::fmt;

use crate::{Request, Result};

/// Executes prepared requests synchronously.
pub trait BlockingTransport: Send + Sync {
    /// The response type produced by this transport.
    type Response;

    /// Provides a textual description of this transport.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockingTransport")
    }

    /// Sends the request and waits for the response.
    fn send(&self, req: Request) -> Result<Self::Response>;
}

impl<T: BlockingTransport + ?Sized> BlockingTransport for &T {
    type Response = T::Response;

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).describe(f)
    }

    fn send(&self, req: Request) -> Result<Self::Response> {
        (**self).send(req)
    }
}

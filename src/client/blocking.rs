use endpointkit_interface::blocking::BlockingTransport;

use super::Client;
use crate::{endpoint::Endpoint, error::Result};

impl Client {
    /// Prepares `endpoint` and sends it through `transport` on the current thread.
    pub fn send_blocking<T, E>(&self, transport: &T, endpoint: &E) -> Result<T::Response>
    where
        T: BlockingTransport + ?Sized,
        E: Endpoint + ?Sized,
    {
        let req = self.prepare(endpoint)?;
        Ok(transport.send(req)?)
    }
}

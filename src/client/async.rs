use endpointkit_interface::r#async::AsyncTransport;

use super::Client;
use crate::{endpoint::Endpoint, error::Result};

impl Client {
    /// Prepares `endpoint` and sends it through `transport`.
    ///
    /// Encoding errors surface without the transport ever being called.
    pub async fn send_async<T, E>(&self, transport: &T, endpoint: &E) -> Result<T::Response>
    where
        T: AsyncTransport,
        E: Endpoint + ?Sized,
    {
        let req = self.prepare(endpoint)?;
        Ok(transport.send(req).await?)
    }
}

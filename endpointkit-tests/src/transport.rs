//! A minimal hyper-backed transport for exercising prepared requests over a real socket.

use std::io;

use endpointkit::interface::{Error, Request, Result};
use http_body_util::{BodyExt, Full};
use hyper::{
    body::Bytes,
    header::{HeaderName, HeaderValue, HOST},
    Uri,
};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureResponse {
    pub status: u16,
    pub body: Bytes,
}

impl FixtureResponse {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HyperTransport;

fn other_io(e: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Io(io::Error::other(e))
}

async fn send_with_hyper(req: Request) -> Result<FixtureResponse> {
    let uri: Uri = req.url.parse().map_err(|_| Error::InvalidUrl)?;
    let authority = uri.authority().ok_or(Error::InvalidUrl)?.clone();
    let port = authority.port_u16().unwrap_or(80);
    let stream = TcpStream::connect((authority.host(), port)).await?;
    let (mut sender, conn) =
        hyper::client::conn::http1::handshake::<_, Full<Bytes>>(TokioIo::new(stream))
            .await
            .map_err(other_io)?;
    tokio::spawn(conn);

    let path_and_query = uri
        .path_and_query()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "/".to_owned());
    let mut builder = hyper::Request::builder()
        .method(req.method.as_str())
        .uri(path_and_query)
        .header(HOST, authority.as_str());
    for (name, value) in &req.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(other_io)?;
        let value = HeaderValue::from_str(value).map_err(other_io)?;
        builder = builder.header(name, value);
    }
    let hyper_req = builder
        .body(Full::new(Bytes::from(req.body)))
        .map_err(other_io)?;

    let response = tokio::time::timeout(req.timeout, sender.send_request(hyper_req))
        .await
        .map_err(|_| Error::RequestTimeout)?
        .map_err(other_io)?;
    let status = response.status().as_u16();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(other_io)?
        .to_bytes();
    Ok(FixtureResponse { status, body })
}

#[cfg(feature = "async")]
impl endpointkit::interface::r#async::AsyncTransport for HyperTransport {
    type Response = FixtureResponse;

    fn send(
        &self,
        req: Request,
    ) -> impl std::future::Future<Output = Result<Self::Response>> + Send {
        send_with_hyper(req)
    }
}

#[cfg(feature = "blocking")]
impl endpointkit::interface::blocking::BlockingTransport for HyperTransport {
    type Response = FixtureResponse;

    fn send(&self, mut req: Request) -> Result<Self::Response> {
        req.headers.push(("blocking".into(), "1".into()));
        crate::TOKIO_RT.block_on(send_with_hyper(req))
    }
}

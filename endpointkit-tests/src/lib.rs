#![cfg(test)]

use std::{
    collections::BTreeMap,
    convert::Infallible,
    future::Future,
    io,
    net::SocketAddr,
    pin::Pin,
    sync::{LazyLock, Mutex, OnceLock},
};

use endpointkit::{ApiHost, Client, ClientBuilder, HostTable};
use http_body_util::Full;
use hyper::{
    body::{self, Bytes},
    server::conn::http1,
    service::service_fn,
    Request, Response,
};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

mod fixtures;
mod request_ext;
mod transport;

pub use request_ext::RequestExt;
pub use transport::HyperTransport;

#[must_use]
struct HyperFixtureHandle(String);

impl Drop for HyperFixtureHandle {
    fn drop(&mut self) {
        let failed_request = {
            let mut services = HYPER_SERVICE_FIXTURES.lock().unwrap();
            services
                .remove(&*self.0)
                .expect("fixture not found")
                .assertion_failed_request
        };
        if let Some(req) = failed_request {
            panic!("assertion failed for request {}: {:?}", self.0, req);
        }
    }
}

type FixtureAssertionResult = (Response<Full<Bytes>>, Result<(), Request<body::Incoming>>);

type HyperServiceFixtureCallback = Box<
    dyn Fn(Request<body::Incoming>) -> Pin<Box<dyn Future<Output = FixtureAssertionResult> + Send>>
        + Send
        + Sync,
>;
struct HyperServiceFixture {
    svc: HyperServiceFixtureCallback,
    assertion_failed_request: Option<Request<body::Incoming>>,
}

static HYPER_SERVICE_FIXTURES: Mutex<BTreeMap<String, HyperServiceFixture>> =
    Mutex::new(BTreeMap::new());

/// Registers a handler for the absolute request path `path`.
fn add_hyper_fixture<Fut>(
    path: impl Into<String>,
    svc_fn: impl Fn(Request<body::Incoming>) -> Fut + Send + Sync + 'static,
) -> HyperFixtureHandle
where
    Fut: Future<Output = FixtureAssertionResult> + Send + 'static,
{
    let mut path: String = path.into();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    let svc = Box::new(move |req| Box::pin(svc_fn(req)) as _);
    let fixture = HyperServiceFixture {
        svc,
        assertion_failed_request: None,
    };
    {
        let path = path.clone();
        let mut services = HYPER_SERVICE_FIXTURES.lock().unwrap();
        services.insert(path, fixture);
    }
    HyperFixtureHandle(path)
}

async fn handle_service(req: Request<body::Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_owned();
    let fut = {
        let services = HYPER_SERVICE_FIXTURES.lock().unwrap();
        match services.get(&*path) {
            Some(fixture) => (fixture.svc)(req),
            None => {
                let mut res = Response::new(Full::new(Bytes::from(path)));
                *res.status_mut() = hyper::StatusCode::NOT_FOUND;
                return Ok(res);
            }
        }
    };
    let (response, result) = fut.await;

    if let Err(req) = result {
        let mut services = HYPER_SERVICE_FIXTURES.lock().unwrap();
        if let Some(fixture) = services.get_mut(&*path) {
            fixture.assertion_failed_request = Some(req);
        }
    }

    Ok(response)
}

async fn setup_hyper_impl() -> Result<String, io::Error> {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));

    let listener = TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.expect("accept failed");
            let io = TokioIo::new(stream);

            tokio::task::spawn(async move {
                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service_fn(handle_service))
                    .await
                {
                    eprintln!("Error serving connection: {err:?}");
                }
            });
        }
    });

    Ok(format!("http://127.0.0.1:{port}"))
}

static TOKIO_RT: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
});

fn server_url() -> &'static str {
    static SERVER_URL: OnceLock<String> = OnceLock::new();
    SERVER_URL.get_or_init(|| TOKIO_RT.block_on(setup_hyper_impl()).unwrap())
}

/// Base path every host is mounted under on the fixture server.
fn host_prefix(host: ApiHost) -> &'static str {
    match host {
        ApiHost::MaxBff => "/bff",
        ApiHost::InnovationBff => "/innovation/",
        ApiHost::MaxGateway => "/gateway/v1",
        ApiHost::WebApi => "",
    }
}

/// Absolute path a request for `host` and `path` arrives at.
fn fixture_path(host: ApiHost, path: &str) -> String {
    format!(
        "{}/{}",
        host_prefix(host).trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn init_environment() -> HostTable {
    let base = server_url();
    HostTable::from_fn(|host| format!("{base}{}", host_prefix(host))).unwrap()
}

fn init_builder() -> ClientBuilder {
    let mut builder = Client::builder();
    builder.environment(init_environment());
    builder
}

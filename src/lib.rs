//! Declarative, transport-agnostic HTTP endpoint descriptions.
//!
//! ## Overview
//!
//! endpointkit lets an application describe *what* request to make without knowing *how* it is
//! dispatched or *where* hosts live. An [`Endpoint`] names a logical [`ApiHost`], a path, a
//! [`Method`] and optionally a query, [`Headers`], a [`Body`], an [`AuthRequirement`], a cache
//! policy, a streaming expectation and a timeout. Everything but host, path and method has a
//! default.
//!
//! A [`Client`] turns an endpoint into a concrete [`Request`](endpointkit_interface::Request):
//!
//! 1. the configured [`EnvironmentProvider`] maps the host to a base URL,
//! 2. the normalized path and the query are appended,
//! 3. headers are merged as defaults, then endpoint headers, then auth headers,
//! 4. the body is encoded and `Content-Type` is set accordingly.
//!
//! Executing the request is left to a transport implementing one of the traits in
//! [`endpointkit-interface`].
//!
//! ## Usage
//!
//! ```
//! use endpointkit::{body_form, ApiHost, Client, HostTable, Route};
//!
//! let production = HostTable::from_fn(|host| match host {
//!     ApiHost::MaxBff => "https://bff.example.com",
//!     ApiHost::InnovationBff => "https://labs.example.com",
//!     ApiHost::MaxGateway => "https://gateway.example.com/v1",
//!     ApiHost::WebApi => "https://www.example.com/api",
//! })?;
//! let client = Client::builder().environment(production).build()?;
//!
//! let login = Route::post(ApiHost::MaxGateway, "session").with_body(body_form! {
//!     "user" => "ada",
//!     "remember" => "yes",
//! });
//! let req = client.prepare(&login)?;
//! assert_eq!(req.url, "https://gateway.example.com/v1/session");
//! assert_eq!(req.body, b"user=ada&remember=yes");
//! # Ok::<_, endpointkit::Error>(())
//! ```
//!
//! ## Thread safety
//!
//! Every value type here is plain owned data and can be sent or shared across threads.
//! Environment providers and authorizers are required to be `Send + Sync`.
//!
//! ## Features
//!
//! - `multipart` (default): Enable `multipart/form-data` bodies.
//! - `json`: Enable [`Body::json`] for serializing values with `serde`.
//! - `blocking`: Enable [`Client::send_blocking`] over a blocking transport.
//! - `async`: Enable [`Client::send_async`] over an async transport.
//!
//! [`endpointkit-interface`]: endpointkit_interface

#![cfg_attr(docsrs, feature(doc_cfg))]

mod auth;
mod body;
mod client;
mod endpoint;
mod environment;
mod error;
pub mod header;
mod host;

pub use auth::{AuthRequirement, Authorizer, NoCredentials, StaticCredentials};
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub use body::Part;
pub use body::Body;
pub use client::{Client, ClientBuilder, ClientOptions};
pub use endpoint::{normalize_path, Endpoint, Query, Route, DEFAULT_TIMEOUT};
pub use endpointkit_interface::{CachePolicy, Method, Request};
pub use environment::{EnvironmentProvider, HostTable, HostTableBuilder};
pub use error::{Error, Result};
#[doc(inline)]
pub use header::Headers;
pub use host::ApiHost;

/// Re-export of the transport-facing crate.
pub use endpointkit_interface as interface;

//! Transport-facing definitions for endpointkit.
//!
//! This crate holds the concrete [`Request`] that the endpointkit facade produces after resolving
//! an endpoint, along with the traits a transport implements to execute it. It carries no
//! knowledge of endpoints, hosts or body variants; by the time a request reaches this layer it is
//! a method, an absolute URL, a list of headers and a byte payload.
//!
//! ## Features
//!
//! - `async`: Enable the async transport trait
//! - `blocking`: Enable the blocking transport trait

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub mod r#async;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;
mod cache;
mod error;
mod request;

pub use cache::CachePolicy;
pub use error::{Error, Result};
pub use request::{Method, ParseMethodError, Request};

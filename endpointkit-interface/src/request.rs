//! Concrete request types handed to transports.

use std::{fmt, str::FromStr, time::Duration};

use thiserror::Error;

use crate::cache::CachePolicy;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
    /// `CONNECT`
    Connect,
}

/// The string did not name one of the nine standard methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown HTTP method: {0}")]
pub struct ParseMethodError(pub String);

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Method; 9] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Head,
        Method::Options,
        Method::Trace,
        Method::Connect,
    ];

    /// Canonical uppercase form of the method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ParseMethodError;

    /// Only the canonical uppercase spelling is accepted; method tokens are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseMethodError(s.to_owned()))
    }
}

/// A fully resolved request, ready for a transport to put on the wire.
///
/// `url` is absolute and already carries the query string. `headers` holds unique names sorted
/// by name. `body` is the encoded payload; an empty vector means no
/// payload. The remaining fields are declarations the transport is expected to honor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Request method.
    pub method: Method,
    /// Absolute request URL including the query string.
    pub url: String,
    /// Header fields to send.
    pub headers: Vec<(String, String)>,
    /// Encoded request payload.
    pub body: Vec<u8>,
    /// Time budget the transport should enforce for the whole exchange.
    pub timeout: Duration,
    /// Hint for the transport's cache layer.
    pub cache_policy: CachePolicy,
    /// Keep the connection open and hand over the response as a stream instead of buffering it.
    pub expects_event_stream: bool,
}

impl Request {
    /// Looks up a header by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

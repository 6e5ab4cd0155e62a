use thiserror::Error;

use endpointkit_interface::Error as TransportError;

use crate::{auth::AuthRequirement, host::ApiHost};

/// Errors produced while resolving or encoding an endpoint.
#[derive(Debug, Error)]
pub enum Error {
    /// The environment provider has no base URL for the host.
    #[error("No base URL mapped for host {0}")]
    UnmappedHost(ApiHost),
    /// A base URL handed to an environment provider is unusable.
    #[error("Invalid base URL for host {host}: {reason}")]
    InvalidBaseUrl {
        /// The host the URL was supplied for.
        host: ApiHost,
        /// Why the URL was rejected.
        reason: String,
    },
    /// The data of a multipart part contains the boundary token.
    #[error("Multipart part {part:?} contains the boundary token")]
    BoundaryCollision {
        /// Name of the offending part.
        part: String,
    },
    /// The MIME type of a multipart part contains a line break.
    #[error("Multipart part {part:?} has a MIME type containing CR or LF")]
    InvalidMimeType {
        /// Name of the offending part.
        part: String,
    },
    /// The endpoint needs credentials the configured authorizer cannot provide.
    #[error("No credentials available for {0:?} authentication")]
    MissingCredentials(AuthRequirement),
    /// A client was built without an environment provider.
    #[error("No environment provider configured")]
    NoEnvironment,
    /// The resolved request URL could not be assembled.
    #[error("Invalid URL")]
    InvalidUrl(#[from] url::ParseError),
    /// Error occurred while serializing a JSON body.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    #[error("JSON serialization Error")]
    Json(#[from] serde_json::Error),
    /// The transport failed to execute the request.
    #[error("Transport Error: {0}")]
    Transport(#[from] TransportError),
}

/// A `Result` alias where the `Err` case is [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

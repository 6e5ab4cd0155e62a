use endpointkit_interface::CachePolicy;

use crate::header::Headers;

/// Request-independent settings applied by a [`Client`](crate::Client).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Headers every request starts from; endpoint and auth headers override them.
    pub default_headers: Headers,
    /// `User-Agent` value added when the default headers do not name one.
    pub user_agent: Option<String>,
    /// Cache policy forced on every request, ignoring what endpoints declare.
    pub cache_policy_override: Option<CachePolicy>,
}

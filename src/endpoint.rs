//! The endpoint contract and a ready-made implementation.

use std::{borrow::Cow, time::Duration};

use endpointkit_interface::{CachePolicy, Method};

use crate::{auth::AuthRequirement, body::Body, header::Headers, host::ApiHost};

/// Timeout an endpoint declares unless it says otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Query parameters, in the order they are appended to the URL.
pub type Query = Vec<(Cow<'static, str>, Cow<'static, str>)>;

/// Everything needed to build a request except the concrete base URL.
///
/// Only [`host`](Endpoint::host), [`path`](Endpoint::path) and [`method`](Endpoint::method) are
/// required; the remaining accessors have defaults. All accessors are expected to be pure. No
/// validation happens at this layer: an empty path or a body on a `GET` is passed along as
/// declared and left for whoever builds the concrete request.
///
/// ```
/// use std::borrow::Cow;
/// use endpointkit::{ApiHost, AuthRequirement, Endpoint, Method};
///
/// struct GetUser(u64);
///
/// impl Endpoint for GetUser {
///     fn host(&self) -> ApiHost {
///         ApiHost::WebApi
///     }
///     fn path(&self) -> Cow<'_, str> {
///         format!("users/{}", self.0).into()
///     }
///     fn method(&self) -> Method {
///         Method::Get
///     }
///     fn auth(&self) -> AuthRequirement {
///         AuthRequirement::Bearer
///     }
/// }
///
/// assert_eq!(GetUser(7).normalized_path(), "/users/7");
/// ```
pub trait Endpoint: Send + Sync {
    /// Logical backend group the request goes to.
    fn host(&self) -> ApiHost;

    /// Path relative to the host's base URL. A leading slash is optional.
    fn path(&self) -> Cow<'_, str>;

    fn method(&self) -> Method;

    /// Query parameters; `None` means no query string at all.
    fn query(&self) -> Option<Query> {
        None
    }

    fn headers(&self) -> Headers {
        Headers::new()
    }

    fn body(&self) -> Body {
        Body::None
    }

    fn auth(&self) -> AuthRequirement {
        AuthRequirement::None
    }

    /// Whether the response is a stream the transport should hand over incrementally instead of
    /// buffering.
    fn expects_event_stream(&self) -> bool {
        false
    }

    fn cache_policy(&self) -> CachePolicy {
        CachePolicy::UseProtocolCachePolicy
    }

    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    /// The path with a guaranteed leading slash. See [`normalize_path`].
    fn normalized_path(&self) -> Cow<'_, str> {
        match self.path() {
            Cow::Borrowed(path) => normalize_path(path),
            Cow::Owned(path) if path.starts_with('/') => Cow::Owned(path),
            Cow::Owned(path) => Cow::Owned(format!("/{path}")),
        }
    }
}

/// Returns `path` unchanged when it starts with `/`, otherwise `"/" + path`.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// An [`Endpoint`] assembled from values, with the trait's defaults preset.
///
/// ```
/// use endpointkit::{ApiHost, Body, Endpoint, Route};
///
/// let route = Route::post(ApiHost::MaxBff, "sessions")
///     .with_header("X-Client", "docs")
///     .with_body(Body::json_bytes(&b"{}"[..]));
/// assert_eq!(route.normalized_path(), "/sessions");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    host: ApiHost,
    method: Method,
    path: Cow<'static, str>,
    query: Option<Query>,
    headers: Headers,
    body: Body,
    auth: AuthRequirement,
    expects_event_stream: bool,
    cache_policy: CachePolicy,
    timeout: Duration,
}

impl Route {
    pub fn new(host: ApiHost, method: Method, path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            host,
            method,
            path: path.into(),
            query: None,
            headers: Headers::new(),
            body: Body::None,
            auth: AuthRequirement::None,
            expects_event_stream: false,
            cache_policy: CachePolicy::UseProtocolCachePolicy,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn get(host: ApiHost, path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(host, Method::Get, path)
    }

    pub fn post(host: ApiHost, path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(host, Method::Post, path)
    }

    pub fn put(host: ApiHost, path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(host, Method::Put, path)
    }

    pub fn patch(host: ApiHost, path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(host, Method::Patch, path)
    }

    pub fn delete(host: ApiHost, path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(host, Method::Delete, path)
    }

    /// Replaces the query. An empty list resolves to a URL without a query string.
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_query_pair(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Merges `headers` over the ones already set.
    pub fn with_headers(mut self, headers: &Headers) -> Self {
        self.headers.merge(headers);
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub fn with_auth(mut self, auth: AuthRequirement) -> Self {
        self.auth = auth;
        self
    }

    pub fn expecting_event_stream(mut self) -> Self {
        self.expects_event_stream = true;
        self
    }

    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Endpoint for Route {
    fn host(&self) -> ApiHost {
        self.host
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.path)
    }

    fn method(&self) -> Method {
        self.method
    }

    fn query(&self) -> Option<Query> {
        self.query.clone()
    }

    fn headers(&self) -> Headers {
        self.headers.clone()
    }

    fn body(&self) -> Body {
        self.body.clone()
    }

    fn auth(&self) -> AuthRequirement {
        self.auth
    }

    fn expects_event_stream(&self) -> bool {
        self.expects_event_stream
    }

    fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<E: Endpoint + ?Sized> Endpoint for &E {
    fn host(&self) -> ApiHost {
        (**self).host()
    }
    fn path(&self) -> Cow<'_, str> {
        (**self).path()
    }
    fn method(&self) -> Method {
        (**self).method()
    }
    fn query(&self) -> Option<Query> {
        (**self).query()
    }
    fn headers(&self) -> Headers {
        (**self).headers()
    }
    fn body(&self) -> Body {
        (**self).body()
    }
    fn auth(&self) -> AuthRequirement {
        (**self).auth()
    }
    fn expects_event_stream(&self) -> bool {
        (**self).expects_event_stream()
    }
    fn cache_policy(&self) -> CachePolicy {
        (**self).cache_policy()
    }
    fn timeout(&self) -> Duration {
        (**self).timeout()
    }
    fn normalized_path(&self) -> Cow<'_, str> {
        (**self).normalized_path()
    }
}

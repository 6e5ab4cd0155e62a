//! Preparing endpoints into concrete requests.

use std::sync::Arc;

use cfg_if::cfg_if;
use endpointkit_interface::Request;
use tracing::{debug, trace};
use url::Url;

use crate::{
    auth::Authorizer,
    endpoint::Endpoint,
    environment::EnvironmentProvider,
    error::Result,
    header::{Headers, USER_AGENT},
};

mod builder;
mod options;

cfg_if! {
    if #[cfg(feature = "async")] {
        mod r#async;
    }
}

cfg_if! {
    if #[cfg(feature = "blocking")] {
        mod blocking;
    }
}

pub use builder::ClientBuilder;
pub use options::ClientOptions;

/// Resolves endpoints against an environment and encodes them into [`Request`]s.
///
/// Cloning is cheap; clones share the environment provider and authorizer.
#[derive(Clone)]
pub struct Client {
    environment: Arc<dyn EnvironmentProvider>,
    authorizer: Arc<dyn Authorizer>,
    options: Arc<ClientOptions>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Absolute URL for `endpoint`: the host's base URL, the normalized path appended to the
    /// base path, then the query pairs in order.
    ///
    /// A base path ending in `/` does not produce a doubled slash. An empty query list produces
    /// no query string. A query already carried by the base URL is kept, and the endpoint's pairs
    /// follow it.
    pub fn resolve_url<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<Url> {
        let mut url = self.environment.base_url(endpoint.host())?;
        let path = format!(
            "{}{}",
            url.path().trim_end_matches('/'),
            endpoint.normalized_path()
        );
        url.set_path(&path);
        if let Some(query) = endpoint.query().filter(|q| !q.is_empty()) {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (&**k, &**v)));
        }
        Ok(url)
    }

    /// Header set for `endpoint`, before body encoding.
    ///
    /// Precedence from lowest to highest: default headers, the configured user agent (only when
    /// the defaults do not name one), the endpoint's headers, then the authorizer's headers.
    pub fn resolve_headers<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<Headers> {
        let mut headers = self.options.default_headers.clone();
        if let Some(user_agent) = &self.options.user_agent {
            if !headers.contains(USER_AGENT) {
                headers.set(USER_AGENT, user_agent.clone());
            }
        }
        headers.merge(&endpoint.headers());
        let auth = endpoint.auth();
        let auth_headers = self.authorizer.authorize(auth)?;
        trace!(
            target: "endpointkit::client",
            ?auth,
            count = auth_headers.len(),
            "merging auth headers"
        );
        headers.merge(&auth_headers);
        Ok(headers)
    }

    /// Builds the concrete request a transport executes.
    pub fn prepare<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<Request> {
        let url = self.resolve_url(endpoint)?;
        let mut headers = self.resolve_headers(endpoint)?;
        let body = endpoint.body().encode(&mut headers)?;
        let cache_policy = self
            .options
            .cache_policy_override
            .unwrap_or_else(|| endpoint.cache_policy());

        let req = Request {
            method: endpoint.method(),
            url: url.into(),
            headers: headers.into_sorted_vec(),
            body,
            timeout: endpoint.timeout(),
            cache_policy,
            expects_event_stream: endpoint.expects_event_stream(),
        };
        debug!(
            target: "endpointkit::client",
            method = %req.method,
            url = %req.url,
            body_len = req.body.len(),
            "prepared request"
        );
        Ok(req)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

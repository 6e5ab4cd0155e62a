//! Host to base URL resolution.

use std::fmt;

use tracing::debug;
use url::Url;

use crate::{
    error::{Error, Result},
    host::ApiHost,
};

/// Maps a logical host to a concrete base URL.
///
/// The embedding application provides this, typically one instance per deployment environment
/// (staging, production, ...). Implementations must be pure functions of `host`: the same
/// instance always returns the same URL for the same host, and may be called concurrently.
///
/// The returned URL carries at least a scheme and an authority (`https://api.example.com`) and
/// may carry a path prefix (`https://api.example.com/v1`). A provider without a mapping for a host
/// must return [`Error::UnmappedHost`] instead of substituting a default.
pub trait EnvironmentProvider: Send + Sync {
    /// Resolves the base URL for `host`.
    fn base_url(&self, host: ApiHost) -> Result<Url>;
}

impl<P: EnvironmentProvider + ?Sized> EnvironmentProvider for &P {
    fn base_url(&self, host: ApiHost) -> Result<Url> {
        (**self).base_url(host)
    }
}

/// An [`EnvironmentProvider`] holding one validated base URL per [`ApiHost`].
///
/// Every host is mapped by construction, so [`base_url`](EnvironmentProvider::base_url) never
/// fails once a table exists.
#[derive(Clone, PartialEq, Eq)]
pub struct HostTable {
    // Indexed by `ApiHost::index`.
    urls: Vec<Url>,
}

impl HostTable {
    /// Builds a table from a function covering every host.
    ///
    /// An exhaustive `match` in `f` makes a missing host a compile error:
    ///
    /// ```
    /// use endpointkit::{ApiHost, HostTable};
    ///
    /// let staging = HostTable::from_fn(|host| match host {
    ///     ApiHost::MaxBff => "https://bff.staging.example.com",
    ///     ApiHost::InnovationBff => "https://labs.staging.example.com/bff",
    ///     ApiHost::MaxGateway => "https://gw.staging.example.com/v1",
    ///     ApiHost::WebApi => "https://staging.example.com/api",
    /// })?;
    /// # Ok::<_, endpointkit::Error>(())
    /// ```
    pub fn from_fn<S: AsRef<str>>(mut f: impl FnMut(ApiHost) -> S) -> Result<Self> {
        let mut urls = Vec::with_capacity(ApiHost::COUNT);
        for host in ApiHost::ALL {
            urls.push(parse_base_url(host, f(host).as_ref())?);
        }
        debug!(target: "endpointkit::environment", "host table built");
        Ok(Self { urls })
    }

    /// Starts a table mapped host by host; [`HostTableBuilder::build`] checks coverage.
    pub fn builder() -> HostTableBuilder {
        HostTableBuilder::default()
    }

    /// Base URL for `host`.
    pub fn get(&self, host: ApiHost) -> &Url {
        &self.urls[host.index()]
    }
}

impl EnvironmentProvider for HostTable {
    fn base_url(&self, host: ApiHost) -> Result<Url> {
        Ok(self.get(host).clone())
    }
}

impl fmt::Debug for HostTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(ApiHost::ALL.iter().map(|h| (h, self.get(*h).as_str())))
            .finish()
    }
}

/// Collects base URLs one host at a time.
#[derive(Debug, Clone, Default)]
pub struct HostTableBuilder {
    urls: [Option<String>; ApiHost::COUNT],
}

impl HostTableBuilder {
    /// Maps `host` to `url`, replacing an earlier mapping.
    pub fn host(&mut self, host: ApiHost, url: impl Into<String>) -> &mut Self {
        self.urls[host.index()] = Some(url.into());
        self
    }

    /// Validates every URL and fails with [`Error::UnmappedHost`] for the first host left out.
    pub fn build(&self) -> Result<HostTable> {
        if let Some(missing) = ApiHost::ALL
            .into_iter()
            .find(|h| self.urls[h.index()].is_none())
        {
            return Err(Error::UnmappedHost(missing));
        }
        HostTable::from_fn(|host| self.urls[host.index()].as_deref().unwrap_or_default())
    }
}

fn parse_base_url(host: ApiHost, raw: &str) -> Result<Url> {
    let invalid = |reason: String| Error::InvalidBaseUrl { host, reason };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !url.has_host() {
        return Err(invalid(format!("{raw:?} has no authority")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(format!("{raw:?} carries a query or fragment")));
    }
    Ok(url)
}

use std::{fmt, sync::Arc};

use endpointkit_interface::CachePolicy;

use super::{Client, ClientOptions};
use crate::{
    auth::{Authorizer, NoCredentials},
    environment::EnvironmentProvider,
    error::{Error, Result},
};

#[derive(Clone, Default)]
pub struct ClientBuilder {
    environment: Option<Arc<dyn EnvironmentProvider>>,
    authorizer: Option<Arc<dyn Authorizer>>,
    pub(crate) options: ClientOptions,
}

impl ClientBuilder {
    /// Required. Resolves every endpoint host to a base URL.
    pub fn environment(&mut self, provider: impl EnvironmentProvider + 'static) -> &mut Self {
        self.environment = Some(Arc::new(provider));
        self
    }

    /// Defaults to [`NoCredentials`].
    pub fn authorizer(&mut self, authorizer: impl Authorizer + 'static) -> &mut Self {
        self.authorizer = Some(Arc::new(authorizer));
        self
    }

    pub fn user_agent(&mut self, user_agent: impl Into<String>) -> &mut Self {
        self.options.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options.default_headers.set(name, value);
        self
    }

    pub fn no_caching(&mut self) -> &mut Self {
        self.options.cache_policy_override =
            Some(CachePolicy::ReloadIgnoringLocalAndRemoteCacheData);
        self
    }

    pub fn cache_policy(&mut self, cache_policy: CachePolicy) -> &mut Self {
        self.options.cache_policy_override = Some(cache_policy);
        self
    }

    pub fn build(&self) -> Result<Client> {
        let environment = self.environment.clone().ok_or(Error::NoEnvironment)?;
        let authorizer = self
            .authorizer
            .clone()
            .unwrap_or_else(|| Arc::new(NoCredentials));
        Ok(Client {
            environment,
            authorizer,
            options: Arc::new(self.options.clone()),
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("environment", &self.environment.is_some())
            .field("authorizer", &self.authorizer.is_some())
            .field("options", &self.options)
            .finish()
    }
}

//! Authentication requirements and the seam that turns them into headers.
//!
//! Endpoints only *declare* which kind of authentication they need. Producing the actual header
//! is the job of an [`Authorizer`] configured on the [`Client`](crate::Client); obtaining or
//! refreshing credentials happens outside this crate.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    error::{Error, Result},
    header::{Headers, AUTHORIZATION},
};

/// Authentication mode an endpoint declares it needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthRequirement {
    /// No authentication.
    #[default]
    None,
    /// HTTP Basic authentication.
    Basic,
    /// OAuth-style bearer token.
    Bearer,
    /// Signed JSON Web Token.
    Jwt,
}

/// Produces the headers that satisfy an [`AuthRequirement`].
///
/// Implementations must be safe to call from several threads at once.
pub trait Authorizer: Send + Sync {
    /// Returns the headers to merge over the endpoint's own headers.
    ///
    /// Implementations return an empty collection for [`AuthRequirement::None`] and
    /// [`Error::MissingCredentials`] for a requirement they cannot satisfy.
    fn authorize(&self, requirement: AuthRequirement) -> Result<Headers>;
}

/// An authorizer holding no credentials; only endpoints without authentication pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl Authorizer for NoCredentials {
    fn authorize(&self, requirement: AuthRequirement) -> Result<Headers> {
        match requirement {
            AuthRequirement::None => Ok(Headers::new()),
            other => Err(Error::MissingCredentials(other)),
        }
    }
}

/// Fixed `Authorization` values keyed by requirement.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    values: HashMap<AuthRequirement, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a complete `Authorization` header value for `requirement`.
    pub fn with(mut self, requirement: AuthRequirement, authorization: impl Into<String>) -> Self {
        self.values.insert(requirement, authorization.into());
        self
    }

    pub fn basic(self, username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        self.with(AuthRequirement::Basic, format!("Basic {encoded}"))
    }

    pub fn bearer(self, token: &str) -> Self {
        self.with(AuthRequirement::Bearer, format!("Bearer {token}"))
    }

    /// JWTs travel with the `Bearer` scheme.
    pub fn jwt(self, token: &str) -> Self {
        self.with(AuthRequirement::Jwt, format!("Bearer {token}"))
    }
}

impl Authorizer for StaticCredentials {
    fn authorize(&self, requirement: AuthRequirement) -> Result<Headers> {
        if requirement == AuthRequirement::None {
            return Ok(Headers::new());
        }
        let value = self
            .values
            .get(&requirement)
            .ok_or(Error::MissingCredentials(requirement))?;
        Ok(Headers::new().with(AUTHORIZATION, value.clone()))
    }
}

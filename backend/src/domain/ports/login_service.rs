//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to verify credentials without knowing the
//! backing store, so HTTP tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Username};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated username.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error>;
}

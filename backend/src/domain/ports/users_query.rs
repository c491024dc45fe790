//! Driving port for the dashboard's user listing.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for listing and counting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user, oldest first.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Number of registered users.
    async fn count_users(&self) -> Result<u64, Error>;
}

//! Port abstraction for the user record store and its errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "user repository query failed: {message}",
        /// Insert rejected because the username is already stored.
        DuplicateUsername => "username is already registered",
        /// Insert rejected because the email is already stored.
        DuplicateEmail => "email is already registered",
    }
}

/// Record store for [`User`] aggregates.
///
/// Adapters must enforce username and email uniqueness atomically on
/// [`UserRepository::insert`]; callers treat the lookup methods as a fast
/// path only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, assigning its identifier and creation time.
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// All users ordered by creation time, then username.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Total number of stored users.
    async fn count(&self) -> Result<u64, UserPersistenceError>;
}

//! Password login against the record store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::credentials::{hash_password, verify_password};
use super::ports::{LoginService, PasswordHasher, UserRepository};
use super::user_persistence_error_mapping::map_user_persistence_error;
use super::{Error, LoginCredentials, PasswordHash, Username};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const PLACEHOLDER_PASSWORD: &str = "placeholder-password-for-unknown-users";

/// [`LoginService`] verifying stored Argon2 digests.
///
/// Unknown usernames and wrong passwords produce the same error. Unknown
/// usernames are also checked against a placeholder digest so both paths pay
/// for one verification.
#[derive(Clone)]
pub struct PasswordLoginService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    placeholder: Arc<OnceCell<PasswordHash>>,
}

impl PasswordLoginService {
    /// Create a new login service.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users,
            hasher,
            placeholder: Arc::new(OnceCell::new()),
        }
    }

    /// Burn one verification against a digest no password matches.
    async fn verify_placeholder(&self, password: &str) -> Result<(), Error> {
        let digest = self
            .placeholder
            .get_or_try_init(|| hash_password(&self.hasher, PLACEHOLDER_PASSWORD))
            .await?;
        verify_password(&self.hasher, password, digest).await?;
        Ok(())
    }
}

#[async_trait]
impl LoginService for PasswordLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            self.verify_placeholder(credentials.password()).await?;
            debug!(username = %credentials.username(), "login for unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&self.hasher, credentials.password(), user.password_hash()).await? {
            debug!(username = %credentials.username(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id(), "user logged in");
        Ok(user.username().clone())
    }
}

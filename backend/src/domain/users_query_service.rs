//! Dashboard listing backed by the record store.

use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{UserRepository, UsersQuery};
use super::user_persistence_error_mapping::map_user_persistence_error;
use super::{Error, User};

/// [`UsersQuery`] that reads straight from the [`UserRepository`].
#[derive(Clone)]
pub struct UsersQueryService {
    users: Arc<dyn UserRepository>,
}

impl UsersQueryService {
    /// Create a new query service over the record store.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UsersQuery for UsersQueryService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users
            .list_all()
            .await
            .map_err(map_user_persistence_error)
    }

    async fn count_users(&self) -> Result<u64, Error> {
        self.users.count().await.map_err(map_user_persistence_error)
    }
}

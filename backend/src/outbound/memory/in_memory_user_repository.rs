//! `UserRepository` kept in process memory.
//!
//! Used when no database URL is configured and by HTTP tests. The uniqueness
//! checks and the push happen under one lock, so concurrent inserts of the
//! same username or email cannot both succeed.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId, Username};

/// In-memory record store.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryUserRepository {
    /// Create an empty store stamping `created_at` from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut users = self.lock()?;
        if users.iter().any(|u| u.username() == &user.username) {
            return Err(UserPersistenceError::DuplicateUsername);
        }
        if users.iter().any(|u| u.email() == &user.email) {
            return Err(UserPersistenceError::DuplicateEmail);
        }

        let stored = User::from_new(user, UserId::random(), self.clock.utc());
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.iter().find(|u| u.email() == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut users = self.lock()?.clone();
        users.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.username().as_ref().cmp(b.username().as_ref()))
        });
        Ok(users)
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let len = self.lock()?.len();
        u64::try_from(len).map_err(|err| UserPersistenceError::query(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory store contract.
    use super::*;
    use crate::domain::PasswordHash;
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock advancing one second per reading.
    struct TickingClock(AtomicI64);

    impl Clock for TickingClock {
        fn local(&self) -> DateTime<chrono::Local> {
            self.utc().with_timezone(&chrono::Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            let secs = self.0.fetch_add(1, Ordering::Relaxed);
            Utc.timestamp_opt(1_700_000_000 + secs, 0)
                .single()
                .expect("valid timestamp")
        }
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new(Arc::new(TickingClock(AtomicI64::new(0))))
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: Username::new(username).expect("username"),
            email: EmailAddress::new(email).expect("email"),
            password_hash: PasswordHash::new("$test$hash").expect("hash"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_then_lookup_by_either_key(repo: InMemoryUserRepository) {
        let stored = repo
            .insert(new_user("bob", "bob@example.com"))
            .await
            .expect("insert");

        let by_name = repo
            .find_by_username(&Username::new("bob").expect("username"))
            .await
            .expect("lookup");
        let by_email = repo
            .find_by_email(&EmailAddress::new("bob@example.com").expect("email"))
            .await
            .expect("lookup");
        assert_eq!(by_name.as_ref(), Some(&stored));
        assert_eq!(by_email.as_ref(), Some(&stored));
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_are_exact_match(repo: InMemoryUserRepository) {
        repo.insert(new_user("bob", "bob@example.com"))
            .await
            .expect("insert");

        let other_case = repo
            .find_by_username(&Username::new("Bob").expect("username"))
            .await
            .expect("lookup");
        assert!(other_case.is_none());
    }

    #[rstest]
    #[case(new_user("bob", "other@example.com"), UserPersistenceError::DuplicateUsername)]
    #[case(new_user("robert", "bob@example.com"), UserPersistenceError::DuplicateEmail)]
    #[case(new_user("bob", "bob@example.com"), UserPersistenceError::DuplicateUsername)]
    #[tokio::test]
    async fn insert_enforces_uniqueness(
        repo: InMemoryUserRepository,
        #[case] second: NewUser,
        #[case] expected: UserPersistenceError,
    ) {
        let first = repo
            .insert(new_user("bob", "bob@example.com"))
            .await
            .expect("first insert");

        let err = repo.insert(second).await.expect_err("duplicate insert");
        assert_eq!(err, expected);
        assert_eq!(repo.count().await.expect("count"), 1);
        assert_eq!(repo.list_all().await.expect("list"), vec![first]);
    }

    #[rstest]
    #[tokio::test]
    async fn list_all_is_ordered_by_creation(repo: InMemoryUserRepository) {
        for (name, email) in [("zed", "z@example.com"), ("amy", "a@example.com")] {
            repo.insert(new_user(name, email)).await.expect("insert");
        }

        let names: Vec<String> = repo
            .list_all()
            .await
            .expect("list")
            .iter()
            .map(|u| u.username().to_string())
            .collect();
        assert_eq!(names, ["zed", "amy"]);
        assert_eq!(repo.count().await.expect("count"), 2);
    }
}

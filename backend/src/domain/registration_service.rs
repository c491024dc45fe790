//! Self-registration use-case.
//!
//! Checks the username, then the email, against the record store before
//! hashing the password and inserting. The store's own uniqueness
//! enforcement is authoritative: a concurrent registration that slips past
//! the lookups is still reported as the matching duplicate error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::credentials::hash_password;
use super::ports::{PasswordHasher, UserPersistenceError, UserRegistration, UserRepository};
use super::user_persistence_error_mapping::map_user_persistence_error;
use super::{NewUser, RegistrationError, RegistrationForm, User};

/// [`UserRegistration`] backed by a record store and a credential hasher.
#[derive(Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegistrationService {
    /// Create a new service over the given collaborators.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    async fn ensure_available(&self, form: &RegistrationForm) -> Result<(), RegistrationError> {
        let taken_username = self
            .users
            .find_by_username(form.username())
            .await
            .map_err(map_user_persistence_error)?;
        if taken_username.is_some() {
            return Err(RegistrationError::DuplicateUsername);
        }

        let taken_email = self
            .users
            .find_by_email(form.email())
            .await
            .map_err(map_user_persistence_error)?;
        if taken_email.is_some() {
            return Err(RegistrationError::DuplicateEmail);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRegistration for RegistrationService {
    async fn register(&self, form: &RegistrationForm) -> Result<User, RegistrationError> {
        if let Err(err) = self.ensure_available(form).await {
            debug!(username = %form.username(), reason = %err, "registration rejected");
            return Err(err);
        }

        let password_hash = hash_password(&self.hasher, form.password()).await?;
        let new_user = NewUser {
            username: form.username().clone(),
            email: form.email().clone(),
            password_hash,
        };

        match self.users.insert(new_user).await {
            Ok(user) => {
                info!(user_id = %user.id(), username = %user.username(), "user registered");
                Ok(user)
            }
            Err(UserPersistenceError::DuplicateUsername) => {
                debug!(username = %form.username(), "username claimed concurrently");
                Err(RegistrationError::DuplicateUsername)
            }
            Err(UserPersistenceError::DuplicateEmail) => {
                debug!(username = %form.username(), "email claimed concurrently");
                Err(RegistrationError::DuplicateEmail)
            }
            Err(other) => Err(map_user_persistence_error(other).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for registration ordering and error mapping.
    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository, PasswordHashError};
    use crate::domain::{EmailAddress, ErrorCode, PasswordHash, UserId, Username};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn form() -> RegistrationForm {
        RegistrationForm::try_from_parts("bob", "bob@example.com", "secret1").expect("valid form")
    }

    fn stored(username: &str, email: &str) -> User {
        User::from_new(
            NewUser {
                username: Username::new(username).expect("username"),
                email: EmailAddress::new(email).expect("email"),
                password_hash: PasswordHash::new("$argon2id$stored").expect("hash"),
            },
            UserId::random(),
            Utc::now(),
        )
    }

    fn prefix_hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|pw| {
            PasswordHash::new(format!("$test${pw}"))
                .map_err(|e| PasswordHashError::hashing(e.to_string()))
        });
        hasher
    }

    fn service(repo: MockUserRepository, hasher: MockPasswordHasher) -> RegistrationService {
        RegistrationService::new(Arc::new(repo), Arc::new(hasher))
    }

    #[rstest]
    #[tokio::test]
    async fn inserts_hashed_user_when_available(form: RegistrationForm) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|new_user| {
                new_user.username.as_ref() == "bob"
                    && new_user.email.as_ref() == "bob@example.com"
                    && new_user.password_hash.as_ref() == "$test$secret1"
            })
            .times(1)
            .returning(|new_user| Ok(User::from_new(new_user, UserId::random(), Utc::now())));

        let user = service(repo, prefix_hasher())
            .register(&form)
            .await
            .expect("registration succeeds");

        assert_eq!(user.username().as_ref(), "bob");
        assert_ne!(user.password_hash().as_ref(), "secret1");
    }

    #[rstest]
    #[tokio::test]
    async fn username_check_wins_over_email_check(form: RegistrationForm) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored("bob", "first@example.com"))));
        repo.expect_find_by_email().never();
        repo.expect_insert().never();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let err = service(repo, hasher)
            .register(&form)
            .await
            .expect_err("duplicate username");
        assert_eq!(err, RegistrationError::DuplicateUsername);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(form: RegistrationForm) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored("someone", "bob@example.com"))));
        repo.expect_insert().never();

        let err = service(repo, prefix_hasher())
            .register(&form)
            .await
            .expect_err("duplicate email");
        assert_eq!(err, RegistrationError::DuplicateEmail);
    }

    #[rstest]
    #[case(UserPersistenceError::DuplicateUsername, RegistrationError::DuplicateUsername)]
    #[case(UserPersistenceError::DuplicateEmail, RegistrationError::DuplicateEmail)]
    #[tokio::test]
    async fn store_level_uniqueness_maps_to_business_errors(
        form: RegistrationForm,
        #[case] store_error: UserPersistenceError,
        #[case] expected: RegistrationError,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(move |_| Err(store_error.clone()));

        let err = service(repo, prefix_hasher())
            .register(&form)
            .await
            .expect_err("racing insert loses");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn lookup_failures_are_faults(
        form: RegistrationForm,
        #[case] store_error: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Err(store_error.clone()));

        let err = service(repo, prefix_hasher())
            .register(&form)
            .await
            .expect_err("store failure");
        assert!(!err.is_rejection());
        match err {
            RegistrationError::Failed(inner) => assert_eq!(inner.code(), expected),
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn hasher_failure_is_a_fault(form: RegistrationForm) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert().never();
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(PasswordHashError::hashing("out of memory")));

        let err = service(repo, hasher)
            .register(&form)
            .await
            .expect_err("hasher failure");
        assert!(matches!(err, RegistrationError::Failed(_)));
    }
}

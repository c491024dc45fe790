//! PostgreSQL-backed `UserRepository` using Diesel.
//!
//! Uniqueness is enforced by the table's constraints, so concurrent
//! registrations of the same username or email resolve to exactly one row;
//! the losing insert surfaces as `DuplicateUsername` / `DuplicateEmail`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, PasswordHash, User, UserId, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            match info.constraint_name() {
                Some(USERNAME_CONSTRAINT) => UserPersistenceError::DuplicateUsername,
                Some(EMAIL_CONSTRAINT) => UserPersistenceError::DuplicateEmail,
                _ => UserPersistenceError::query("unique constraint violated"),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

/// Convert a stored row into a domain user.
///
/// Rows written by this adapter always satisfy the domain invariants; a
/// failure here means the table was edited out of band.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let corrupt = |err: crate::domain::UserValidationError| {
        UserPersistenceError::query(format!("stored user {} is invalid: {err}", row.id))
    };
    let new_user = NewUser {
        username: Username::new(&row.username).map_err(corrupt)?,
        email: EmailAddress::new(&row.email).map_err(corrupt)?,
        password_hash: PasswordHash::new(row.password_hash.as_str()).map_err(corrupt)?,
    };
    Ok(User::from_new(
        new_user,
        UserId::from_uuid(row.id),
        row.created_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = UserId::random();
        let row = NewUserRow {
            id: *id.as_uuid(),
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_ref(),
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_user(stored)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::username.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total).map_err(|err| UserPersistenceError::query(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and row conversion; queries are covered against a live
    //! database only.
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    struct Violation {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for Violation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Violation { constraint }))
    }

    #[rstest]
    #[case(Some("users_username_key"), UserPersistenceError::DuplicateUsername)]
    #[case(Some("users_email_key"), UserPersistenceError::DuplicateEmail)]
    #[case(None, UserPersistenceError::query("unique constraint violated"))]
    fn unique_violations_map_by_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] expected: UserPersistenceError,
    ) {
        let err = map_diesel_error(database_error(DatabaseErrorKind::UniqueViolation, constraint));
        assert_eq!(err, expected);
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(DieselError::NotFound);
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn rows_convert_to_users() {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let user = row_to_user(UserRow {
            id,
            username: "bob".into(),
            email: "bob@example.com".into(),
            password_hash: "$argon2id$hash".into(),
            created_at,
        })
        .expect("valid row");

        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.username().as_ref(), "bob");
        assert_eq!(user.created_at(), created_at);
    }

    #[rstest]
    fn blank_stored_username_is_reported() {
        let err = row_to_user(UserRow {
            id: Uuid::new_v4(),
            username: " ".into(),
            email: "bob@example.com".into(),
            password_hash: "$argon2id$hash".into(),
            created_at: Utc::now(),
        })
        .expect_err("blank username");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}

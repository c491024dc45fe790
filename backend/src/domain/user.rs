//! User data model.
//!
//! A [`User`] is created once by registration and never edited. The store
//! assigns `id` and `created_at`; the service supplies a [`NewUser`] with an
//! already hashed password.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was empty or whitespace only.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Email was empty or whitespace only.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Stored password hash was blank.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an identifier produced by a store.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! exact_text {
    ($(#[$meta:meta])* $name:ident, $empty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Accept the value exactly as given unless it is blank.
            pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
                let raw = value.as_ref();
                if raw.trim().is_empty() {
                    return Err(UserValidationError::$empty);
                }
                Ok(Self(raw.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

exact_text!(
    /// Login name, unique across users and compared exactly.
    Username,
    EmptyUsername
);

exact_text!(
    /// Contact address, unique across users. Only presence is checked.
    EmailAddress,
    EmptyEmail
);

/// One-way password digest in PHC string format.
///
/// Not `Serialize`: hashes stay inside the persistence and credential
/// layers.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a digest produced by a credential hasher or read from storage.
    pub fn new(hash: impl Into<String>) -> Result<Self, UserValidationError> {
        let hash = hash.into();
        if hash.is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(hash))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// User record ready for insertion; the store assigns identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

/// Registered application user.
///
/// ## Invariants
/// - `username` and `email` are stored as submitted and are not blank.
/// - `password_hash` never equals the plaintext it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a stored user from a new-user record and store-assigned fields.
    pub fn from_new(new_user: NewUser, id: UserId, created_at: DateTime<Utc>) -> Self {
        let NewUser {
            username,
            email,
            password_hash,
        } = new_user;
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password digest.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Insertion timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Public projection suitable for views; excludes the password hash.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// View-safe projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
}

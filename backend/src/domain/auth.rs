//! Login credentials and the authenticated identity.
//!
//! Inbound adapters parse raw form strings into these types before talking to
//! the [`LoginService`](crate::domain::ports::LoginService) port.

use zeroize::Zeroizing;

use super::{UserValidationError, Username};

/// Domain error returned when login form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was empty or whitespace only.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is kept as submitted and is not blank.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use user_directory::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "secret").unwrap();
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username).map_err(|_| LoginValidationError::EmptyUsername)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for store lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity established by the authentication gate for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(Username);

impl AuthenticatedUser {
    /// Wrap an authenticated username.
    pub fn new(username: Username) -> Self {
        Self(username)
    }

    /// Rebuild the identity from a raw session value.
    pub fn from_session_value(raw: &str) -> Result<Self, UserValidationError> {
        Username::new(raw).map(Self)
    }

    /// Authenticated username.
    pub fn username(&self) -> &Username {
        &self.0
    }
}

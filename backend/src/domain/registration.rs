//! Registration input and failure taxonomy.

use zeroize::Zeroizing;

use super::{EmailAddress, Error, Username};

/// Field-level problems with a submitted registration form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Username was empty or whitespace only.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Email was empty or whitespace only.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Why a registration attempt did not create a user.
///
/// Everything except [`RegistrationError::Failed`] is a business-rule
/// rejection that the caller shows back to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Another user already holds the username.
    #[error("Username already exists")]
    DuplicateUsername,
    /// Another user already holds the email address.
    #[error("Email already exists")]
    DuplicateEmail,
    /// The submitted form was incomplete.
    #[error(transparent)]
    Invalid(#[from] RegistrationValidationError),
    /// The store or hasher failed; not recoverable at the form level.
    #[error(transparent)]
    Failed(#[from] Error),
}

impl RegistrationError {
    /// Whether the form should be re-displayed with [`Self::to_string`].
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Validated registration form.
///
/// ## Invariants
/// - `username` and `email` are kept as submitted and are not blank.
/// - `password` is non-empty and zeroed on drop.
///
/// # Examples
/// ```
/// use user_directory::domain::RegistrationForm;
///
/// let form = RegistrationForm::try_from_parts("bob", "bob@example.com", "secret1").unwrap();
/// assert_eq!(form.username().as_ref(), "bob");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl RegistrationForm {
    /// Validate raw form values, checking username, email, then password.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username =
            Username::new(username).map_err(|_| RegistrationValidationError::EmptyUsername)?;
        let email = EmailAddress::new(email).map_err(|_| RegistrationValidationError::EmptyEmail)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password; only ever handed to the credential hasher.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

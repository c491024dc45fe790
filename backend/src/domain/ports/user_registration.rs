//! Driving port for self-registration.

use async_trait::async_trait;

use crate::domain::{RegistrationError, RegistrationForm, User};

/// Domain use-case port creating new users.
///
/// Registration is not idempotent; adapters must not retry a call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create a user from a validated form.
    async fn register(&self, form: &RegistrationForm) -> Result<User, RegistrationError>;
}

//! URL-encoded form bodies.
//!
//! Every field is required; a missing field fails extraction with 400
//! before any handler runs.

use serde::Deserialize;

use crate::domain::{
    LoginCredentials, LoginValidationError, RegistrationForm, RegistrationValidationError,
};

/// Body of `POST /login`.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl TryFrom<&LoginForm> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Body of `POST /register`.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<&RegisterForm> for RegistrationForm {
    type Error = RegistrationValidationError;

    fn try_from(value: &RegisterForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.email, &value.password)
    }
}

/// Query flags accepted by `GET /login`; only key presence matters.
#[derive(Debug, Default, Deserialize)]
pub struct LoginNotices {
    pub registered: Option<String>,
    pub error: Option<String>,
    pub logout: Option<String>,
}

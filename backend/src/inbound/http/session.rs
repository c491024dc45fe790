//! Session helpers so handlers never touch cookie keys directly.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AuthenticatedUser, Error, Username};

pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype exposing the login-related session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start an authenticated session for `username`.
    ///
    /// The session is renewed first so a pre-login cookie cannot be reused
    /// after authentication.
    pub fn persist_user(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, username.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Identity recorded by a previous login, if any.
    ///
    /// Unreadable or blank values are treated as anonymous.
    pub fn authenticated_user(&self) -> Result<Option<AuthenticatedUser>, Error> {
        let raw = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match AuthenticatedUser::from_session_value(&value) {
            Ok(user) => Some(user),
            Err(error) => {
                warn!(%error, "invalid username in session cookie");
                None
            }
        }))
    }

    /// Drop every session value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

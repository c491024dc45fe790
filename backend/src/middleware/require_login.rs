//! Authentication gate for protected pages.
//!
//! [`RequireLogin`] must sit inside the session middleware. Requests whose
//! session carries a valid identity continue with an [`AuthenticatedUser`]
//! in the request extensions; everything else is redirected to `/login`
//! without reaching the handler.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::LOCATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{self, AuthenticatedUser};
use crate::inbound::http::session::SessionContext;

/// Where anonymous visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Middleware factory guarding a scope or resource.
#[derive(Clone, Copy, Default)]
pub struct RequireLogin;

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireLoginMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service produced by [`RequireLogin`].
pub struct RequireLoginMiddleware<S> {
    service: Rc<S>,
}

fn redirect_to_login(req: ServiceRequest) -> ServiceResponse {
    let response = HttpResponse::Found()
        .insert_header((LOCATION, LOGIN_PATH))
        .finish();
    req.into_response(response)
}

impl<S, B> Service<ServiceRequest> for RequireLoginMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let session = SessionContext::new(req.get_session());
            match session.authenticated_user()? {
                Some(user) => {
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                None => {
                    debug!(path = req.path(), "anonymous request redirected to login");
                    Ok(redirect_to_login(req).map_into_right_body())
                }
            }
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = domain::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| domain::Error::unauthorized("login required")),
        )
    }
}

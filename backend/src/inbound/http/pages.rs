//! Page handlers.
//!
//! ```text
//! GET  /           -> 302 /login
//! GET  /login      login view (flags: registered, error, logout)
//! POST /login      302 /dashboard | 302 /login?error
//! POST /logout     302 /login?logout
//! GET  /register   register view
//! POST /register   302 /login?registered | register view with error
//! GET  /dashboard  dashboard view (login required)
//! ```

use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{HttpResponse, get, post, web};
use tracing::{debug, info};

use crate::domain::{
    AuthenticatedUser, ErrorCode, LoginCredentials, RegistrationError, RegistrationForm, User,
    UserSummary,
};
use crate::middleware::RequireLogin;

use super::error::PageResult;
use super::forms::{LoginForm, LoginNotices, RegisterForm};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{View, ViewName};

const LOGIN_FAILED: &str = "/login?error";

fn redirect(location: &'static str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}

fn render(state: &HttpState, view: &View) -> PageResult<HttpResponse> {
    let body = state.views.render(view)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

/// Register every page handler on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_directory::inbound::http::pages;
///
/// let app = App::new().configure(pages::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(login_page)
        .service(login_submit)
        .service(logout)
        .service(register_page)
        .service(register_submit)
        .service(dashboard);
}

#[get("/")]
pub async fn home() -> HttpResponse {
    redirect("/login")
}

#[get("/login")]
pub async fn login_page(
    state: web::Data<HttpState>,
    notices: web::Query<LoginNotices>,
) -> PageResult<HttpResponse> {
    let mut view = View::new(ViewName::Login);
    if notices.registered.is_some() {
        view = view.with_flag("registered");
    }
    if notices.error.is_some() {
        view = view.with_flag("error");
    }
    if notices.logout.is_some() {
        view = view.with_flag("logout");
    }
    render(&state, &view)
}

/// Verify credentials and start an authenticated session.
///
/// Blank fields and rejected credentials look the same to the client.
#[post("/login")]
pub async fn login_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> PageResult<HttpResponse> {
    let credentials = match LoginCredentials::try_from(&*form) {
        Ok(credentials) => credentials,
        Err(err) => {
            debug!(%err, "login form rejected");
            return Ok(redirect(LOGIN_FAILED));
        }
    };

    match state.login.authenticate(&credentials).await {
        Ok(username) => {
            session.persist_user(&username)?;
            info!(%username, "user logged in");
            Ok(redirect("/dashboard"))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            info!(username = %credentials.username(), "login rejected");
            Ok(redirect(LOGIN_FAILED))
        }
        Err(err) => Err(err),
    }
}

#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    redirect("/login?logout")
}

#[get("/register")]
pub async fn register_page(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    render(&state, &View::new(ViewName::Register))
}

/// Create an account, or re-display the form with the reason it failed.
///
/// The submitted username and email are echoed back; the password never is.
#[post("/register")]
pub async fn register_submit(
    state: web::Data<HttpState>,
    form: web::Form<RegisterForm>,
) -> PageResult<HttpResponse> {
    let outcome = match RegistrationForm::try_from(&*form) {
        Ok(registration) => state.registration.register(&registration).await,
        Err(err) => Err(RegistrationError::from(err)),
    };

    match outcome {
        Ok(_) => Ok(redirect("/login?registered")),
        Err(RegistrationError::Failed(err)) => Err(err),
        Err(rejection) => {
            let view = View::new(ViewName::Register)
                .with("error", rejection.to_string())?
                .with("username", form.username.as_str())?
                .with("email", form.email.as_str())?;
            render(&state, &view)
        }
    }
}

#[get("/dashboard", wrap = "RequireLogin")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> PageResult<HttpResponse> {
    let users = state.users.list_users().await?;
    let total = state.users.count_users().await?;
    let summaries: Vec<UserSummary> = users.iter().map(User::summary).collect();

    let view = View::new(ViewName::Dashboard)
        .with("username", user.username())?
        .with("users", summaries)?
        .with("totalUsers", total)?;
    render(&state, &view)
}

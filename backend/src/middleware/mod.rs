//! Request middleware.
//!
//! [`Trace`] wraps every request; [`RequireLogin`] guards protected pages.

pub mod require_login;
pub mod trace;

pub use require_login::RequireLogin;
pub use trace::Trace;

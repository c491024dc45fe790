//! Domain primitives, services, and ports.
//!
//! Purpose: define the user model and the registration, login, and listing
//! use-cases independently of HTTP and storage. Inbound adapters call the
//! driving ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failure payload.
//! - [`User`], [`NewUser`], [`Username`], [`EmailAddress`], [`PasswordHash`].
//! - [`RegistrationForm`] / [`RegistrationError`] — registration contract.
//! - [`RegistrationService`], [`UsersQueryService`], [`PasswordLoginService`].

pub mod auth;
mod credentials;
pub mod error;
mod login_service;
pub mod ports;
pub mod registration;
mod registration_service;
pub mod trace_id;
pub mod user;
mod user_persistence_error_mapping;
mod users_query_service;

pub use self::auth::{AuthenticatedUser, LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::login_service::PasswordLoginService;
pub use self::registration::{RegistrationError, RegistrationForm, RegistrationValidationError};
pub use self::registration_service::RegistrationService;
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, NewUser, PasswordHash, User, UserId, UserSummary, UserValidationError, Username,
};
pub use self::users_query_service::UsersQueryService;

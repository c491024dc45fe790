//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `UserRegistration`, `UsersQuery`) are what
//! inbound adapters call; driven ports (`UserRepository`, `PasswordHasher`)
//! are what outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod user_registration;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

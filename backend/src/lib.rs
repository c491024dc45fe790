//! User directory: self-registration, login, and a dashboard of all users.
//!
//! Layout follows ports and adapters: [`domain`] holds the model, services,
//! and port traits; [`inbound`] serves HTTP; [`outbound`] implements storage
//! and hashing; [`middleware`] carries request tracing and the login gate.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::{RequireLogin, Trace};

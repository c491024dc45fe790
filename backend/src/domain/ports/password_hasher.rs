//! Driven port for one-way password hashing.
//!
//! Hashing is CPU-bound and synchronous; adapters must produce self-describing
//! digests (salt and parameters embedded) so verification needs no extra
//! state.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hasher adapters.
    pub enum PasswordHashError {
        /// The hasher failed to derive a digest.
        Hashing { message } => "password hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedHash { message } => "stored password hash is malformed: {message}",
    }
}

/// Credential hasher used by registration and login.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a storable digest from `password`.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored digest.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}

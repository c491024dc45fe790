//! Async wrappers running the credential hasher off the request executor.
//!
//! Argon2 hashing is CPU-bound, so both helpers move the work onto Tokio's
//! blocking pool and translate hasher failures into domain errors.

use std::sync::Arc;

use tracing::error;
use zeroize::Zeroizing;

use super::ports::{PasswordHashError, PasswordHasher};
use super::{Error, PasswordHash};

fn map_hash_error(err: PasswordHashError) -> Error {
    error!(error = %err, "credential hasher failed");
    Error::internal(err.to_string())
}

fn map_join_error(err: tokio::task::JoinError) -> Error {
    error!(error = %err, "credential hashing task did not complete");
    Error::internal("credential hashing task did not complete")
}

/// Hash `password`, refusing digests that equal the plaintext.
pub(crate) async fn hash_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
) -> Result<PasswordHash, Error> {
    let hasher = Arc::clone(hasher);
    let plaintext = Zeroizing::new(password.to_owned());
    let digest = tokio::task::spawn_blocking(move || {
        let digest = hasher.hash(&plaintext)?;
        Ok::<_, PasswordHashError>((digest.as_ref() != plaintext.as_str()).then_some(digest))
    })
    .await
    .map_err(map_join_error)?
    .map_err(map_hash_error)?;

    digest.ok_or_else(|| Error::internal("credential hasher returned the plaintext password"))
}

/// Verify `password` against a stored digest.
pub(crate) async fn verify_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
    hash: &PasswordHash,
) -> Result<bool, Error> {
    let hasher = Arc::clone(hasher);
    let plaintext = Zeroizing::new(password.to_owned());
    let hash = hash.clone();
    tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
        .await
        .map_err(map_join_error)?
        .map_err(map_hash_error)
}

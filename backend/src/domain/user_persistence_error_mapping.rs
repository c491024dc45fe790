//! Shared mapping from user persistence failures to domain errors.

use super::Error;
use super::ports::UserPersistenceError;

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername | UserPersistenceError::DuplicateEmail => {
            Error::conflict(error.to_string())
        }
    }
}

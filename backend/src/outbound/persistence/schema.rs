//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` and `email` carry the `users_username_key` and
    /// `users_email_key` unique constraints.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        /// Argon2id PHC string; never the plaintext.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: process-local user store used without a database.
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **security**: Argon2id password hashing.

pub mod memory;
pub mod persistence;
pub mod security;

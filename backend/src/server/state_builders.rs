//! Wiring of domain services onto the configured adapters.

use std::sync::Arc;

use tracing::info;
use user_directory::domain::ports::{PasswordHasher, UserRepository};
use user_directory::domain::{PasswordLoginService, RegistrationService, UsersQueryService};
use user_directory::inbound::http::{HtmlViewRenderer, HttpState};
use user_directory::outbound::memory::InMemoryUserRepository;
use user_directory::outbound::persistence::{DbPool, DieselUserRepository};
use user_directory::outbound::security::Argon2PasswordHasher;

/// Pick the user store: PostgreSQL when a pool exists, memory otherwise.
fn build_user_repository(pool: Option<&DbPool>) -> Arc<dyn UserRepository> {
    match pool {
        Some(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
        None => {
            info!("no database configured; users are kept in memory");
            Arc::new(InMemoryUserRepository::default())
        }
    }
}

/// Build the handler state shared by every worker.
pub(super) fn build_http_state(pool: Option<&DbPool>) -> HttpState {
    let users = build_user_repository(pool);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());

    HttpState::new(
        Arc::new(RegistrationService::new(users.clone(), hasher.clone())),
        Arc::new(UsersQueryService::new(users.clone())),
        Arc::new(PasswordLoginService::new(users, hasher)),
        Arc::new(HtmlViewRenderer),
    )
}

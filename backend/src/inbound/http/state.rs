//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on ports, so
//! tests can swap any collaborator for a mock.

use std::sync::Arc;

use crate::domain::ports::{LoginService, UserRegistration, UsersQuery};

use super::views::ViewRenderer;

/// Dependency bundle for page handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub users: Arc<dyn UsersQuery>,
    pub login: Arc<dyn LoginService>,
    pub views: Arc<dyn ViewRenderer>,
}

impl HttpState {
    pub fn new(
        registration: Arc<dyn UserRegistration>,
        users: Arc<dyn UsersQuery>,
        login: Arc<dyn LoginService>,
        views: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            registration,
            users,
            login,
            views,
        }
    }
}

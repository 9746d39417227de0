//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they only depend on
//! the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};
use crate::domain::UserService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from individual port implementations.
    pub fn new(users_command: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self {
            users_command,
            users_query,
        }
    }

    /// Wire both ports to one [`UserService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_service::inbound::http::state::HttpState;
    /// use user_service::outbound::memory::InMemoryUserRepository;
    ///
    /// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
    /// let _query = state.users_query.clone();
    /// ```
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: UserRepository + 'static,
    {
        let service = Arc::new(UserService::new(repository));
        Self::new(service.clone(), service)
    }
}

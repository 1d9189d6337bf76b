//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side user port.
    pub users: Arc<dyn UsersQuery>,
    /// Write-side user port.
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from the user ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use roster::domain::UserService;
    /// use roster::inbound::http::state::HttpState;
    /// use roster::outbound::memory::InMemoryUserRepository;
    ///
    /// let service = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())));
    /// let state = HttpState::new(service.clone(), service);
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users,
            users_command,
        }
    }

    /// Construct state where one value serves both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UsersQuery + UsersCommand + 'static,
    {
        Self::new(service.clone(), service)
    }
}

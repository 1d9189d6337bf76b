//! Driven port for the user record store.
//!
//! Adapters iterate users by ascending id so aggregation results are stable
//! across stores.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds this email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Record store holding [`User`] rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the user holding `email`, matched exactly.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Users whose name contains `fragment`. Matching is case-sensitive.
    async fn find_by_name_containing(
        &self,
        fragment: &str,
    ) -> Result<Vec<User>, UserPersistenceError>;

    /// Users with exactly this age.
    async fn find_by_age(&self, age: u32) -> Result<Vec<User>, UserPersistenceError>;

    /// Whether a user with `id` is stored.
    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Insert or overwrite a user and return the stored row.
    ///
    /// A user without an id receives a fresh one. A user carrying an id
    /// replaces the row with that id, or is inserted under it when absent.
    async fn save(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Remove the user with `id`. Missing ids are a no-op.
    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError>;
}

//! Driving port for user writes.
//!
//! Implementations validate the email shape before touching the store and
//! report missing ids as `NotFound`.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId};

/// Name parts and contact details for [`UsersCommand::create_user_with_names`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedUserRequest {
    /// Given name, any case.
    pub first_name: String,
    /// Family name, any case.
    pub last_name: String,
    /// Contact email, validated by the command.
    pub email: String,
    /// Age in years, if known.
    pub age: Option<u32>,
}

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the email is malformed, `Conflict` when it is
    /// already registered.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Store a new user whose name is built from `first_name` and `last_name`.
    async fn create_user_with_names(&self, request: NamedUserRequest) -> Result<User, Error>;

    /// Replace every field of the user with `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when no user has `id`; this takes precedence over a
    /// malformed email, which yields `InvalidRequest`.
    async fn update_user(&self, id: UserId, user: NewUser) -> Result<User, Error>;

    /// Delete the user with `id`, returning whether it existed.
    async fn delete_user(&self, id: UserId) -> Result<bool, Error>;
}

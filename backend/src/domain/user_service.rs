//! User domain service.
//!
//! [`UserService`] implements the [`UsersQuery`] and [`UsersCommand`]
//! driving ports on top of a [`UserRepository`]. Writes validate the email
//! shape before the store is touched; updates check existence first so a
//! missing id is reported as `NotFound` whatever the payload.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    NamedUserRequest, UserPersistenceError, UserRepository, UserStatistics, UsersCommand,
    UsersQuery,
};
use crate::domain::{
    AgeCategory, Error, NewUser, User, UserId, age_distribution, age_statistics, categorize,
    format_name, is_valid_email, welcome_messages_for,
};

/// User service implementing the user driving ports.
#[derive(Clone)]
pub struct UserService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> UserService<R> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("email already registered: {email}")).with_details(json!({
                "field": "email",
                "code": "duplicate_email",
            }))
        }
    }
}

fn ensure_valid_email(email: &str) -> Result<(), Error> {
    if is_valid_email(email) {
        return Ok(());
    }
    Err(Error::invalid_request(format!("invalid email format: {email}")).with_details(json!({
        "field": "email",
        "code": "invalid_email",
    })))
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

impl<R> UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn all_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_persistence_error)
    }

    async fn store(&self, user: &User) -> Result<User, Error> {
        let saved = self
            .repository
            .save(user)
            .await
            .map_err(map_persistence_error)?;
        info!(
            user_id = saved.id().map(UserId::get),
            name = saved.name(),
            "user saved"
        );
        Ok(saved)
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.all_users().await
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, Error> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("no user with email {email}")))
    }

    async fn search_users_by_name(&self, fragment: &str) -> Result<Vec<User>, Error> {
        self.repository
            .find_by_name_containing(fragment)
            .await
            .map_err(map_persistence_error)
    }

    async fn users_with_age(&self, age: u32) -> Result<Vec<User>, Error> {
        self.repository
            .find_by_age(age)
            .await
            .map_err(map_persistence_error)
    }

    async fn welcome_messages(&self, greeting: &str) -> Result<Vec<String>, Error> {
        let users = self.all_users().await?;
        Ok(welcome_messages_for(&users, greeting))
    }

    async fn statistics(&self) -> Result<UserStatistics, Error> {
        let users = self.all_users().await?;
        Ok(UserStatistics {
            ages: age_statistics(&users),
            age_distribution: age_distribution(&users),
        })
    }

    async fn users_by_age_category(&self) -> Result<BTreeMap<AgeCategory, Vec<User>>, Error> {
        let users = self.all_users().await?;
        Ok(categorize(&users))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        ensure_valid_email(user.email())?;
        self.store(&user.into_user(None)).await
    }

    async fn create_user_with_names(&self, request: NamedUserRequest) -> Result<User, Error> {
        let NamedUserRequest {
            first_name,
            last_name,
            email,
            age,
        } = request;
        ensure_valid_email(&email)?;
        let user = NewUser::try_new(format_name(&first_name, &last_name), email, age).map_err(
            |err| {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": "name",
                    "code": "empty_field",
                }))
            },
        )?;
        self.store(&user.into_user(None)).await
    }

    async fn update_user(&self, id: UserId, user: NewUser) -> Result<User, Error> {
        let exists = self
            .repository
            .exists_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        if !exists {
            return Err(user_not_found(id));
        }
        ensure_valid_email(user.email())?;
        self.store(&user.into_user(Some(id))).await
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, Error> {
        let exists = self
            .repository
            .exists_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        if !exists {
            return Ok(false);
        }
        self.repository
            .delete_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = id.get(), "user deleted");
        Ok(true)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;

//! `UserRepository` backed by a mutex-guarded map.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<UserId, User>,
    last_id: i64,
}

impl Table {
    fn next_id(&mut self) -> Result<UserId, UserPersistenceError> {
        let raw = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        let id = UserId::new(raw).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        self.last_id = raw;
        Ok(id)
    }

    fn email_taken_by_other(&self, email: &str, id: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|row| row.email() == email && row.id() != id)
    }
}

/// Thread-safe in-memory implementation of the [`UserRepository`] port.
///
/// Enforces email uniqueness like the database constraint and never holds
/// its lock across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `users`.
    ///
    /// Users carrying an id keep it; the rest are numbered after the
    /// highest id seen.
    ///
    /// # Errors
    ///
    /// Returns [`UserPersistenceError::DuplicateEmail`] when two seeds share
    /// an email.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Result<Self, UserPersistenceError> {
        let repo = Self::new();
        {
            let mut table = repo.lock()?;
            for user in users {
                insert_or_replace(&mut table, &user)?;
            }
        }
        Ok(repo)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, UserPersistenceError> {
        self.table
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store poisoned"))
    }

    fn select<F>(&self, predicate: F) -> Result<Vec<User>, UserPersistenceError>
    where
        F: Fn(&User) -> bool,
    {
        let table = self.lock()?;
        Ok(table
            .rows
            .values()
            .filter(|user| predicate(user))
            .cloned()
            .collect())
    }
}

fn insert_or_replace(table: &mut Table, user: &User) -> Result<User, UserPersistenceError> {
    if table.email_taken_by_other(user.email(), user.id()) {
        return Err(UserPersistenceError::duplicate_email(user.email()));
    }
    let id = match user.id() {
        Some(id) => {
            table.last_id = table.last_id.max(id.get());
            id
        }
        None => table.next_id()?,
    };
    let stored = user.clone().with_id(id);
    table.rows.insert(id, stored.clone());
    Ok(stored)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.select(|_| true)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.select(|user| user.email() == email)?.into_iter().next())
    }

    async fn find_by_name_containing(
        &self,
        fragment: &str,
    ) -> Result<Vec<User>, UserPersistenceError> {
        self.select(|user| user.name().contains(fragment))
    }

    async fn find_by_age(&self, age: u32) -> Result<Vec<User>, UserPersistenceError> {
        self.select(|user| user.age() == Some(age))
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.rows.contains_key(&id))
    }

    async fn save(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut table = self.lock()?;
        insert_or_replace(&mut table, user)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        self.lock()?.rows.remove(&id);
        Ok(())
    }
}

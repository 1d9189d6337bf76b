//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`User::try_new`] and [`NewUser::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The name was empty or whitespace.
    #[error("name must not be empty")]
    EmptyName,
    /// The identifier was not a positive integer.
    #[error("user id must be a positive integer")]
    InvalidId,
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier, rejecting zero and negative values.
    pub fn new(raw: i64) -> Result<Self, UserValidationError> {
        if raw <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// The raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application user.
///
/// ## Invariants
/// - `name` is non-empty once trimmed of whitespace.
/// - `id` is `None` until the record store assigns one and never changes
///   afterwards.
/// - `age` of `None` means unknown; such users are left out of every
///   age-based aggregation.
///
/// Email shape is *not* checked here; the write path validates it before
/// anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: Option<UserId>,
    name: String,
    email: String,
    age: Option<u32>,
}

impl User {
    /// Build a transient user, panicking if the name is blank.
    ///
    /// Prefer [`User::try_new`] for untrusted input.
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: Option<u32>) -> Self {
        match Self::try_new(name, email, age) {
            Ok(value) => value,
            Err(err) => panic!("user values must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor for a user that has not been persisted yet.
    pub fn try_new(
        name: impl Into<String>,
        email: impl Into<String>,
        age: Option<u32>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self {
            id: None,
            name,
            email: email.into(),
            age,
        })
    }

    /// Return the same user carrying the given identifier.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Store-assigned identifier, if persisted.
    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Age in years, if known.
    pub fn age(&self) -> Option<u32> {
        self.age
    }
}

/// Field values for a create or update request.
///
/// Carries no identifier: creates let the store assign one and updates keep
/// the stored id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
    age: Option<u32>,
}

impl NewUser {
    /// Validate the name and build the payload.
    pub fn try_new(
        name: impl Into<String>,
        email: impl Into<String>,
        age: Option<u32>,
    ) -> Result<Self, UserValidationError> {
        let User {
            name, email, age, ..
        } = User::try_new(name, email, age)?;
        Ok(Self { name, email, age })
    }

    /// Requested email, unvalidated.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Requested name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Requested age.
    pub fn age(&self) -> Option<u32> {
        self.age
    }

    /// Turn the payload into a user, optionally pinned to an existing id.
    pub fn into_user(self, id: Option<UserId>) -> User {
        let Self { name, email, age } = self;
        User {
            id,
            name,
            email,
            age,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    #[serde(default)]
    id: Option<i64>,
    name: String,
    email: String,
    #[serde(default)]
    age: Option<u32>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            age,
        } = value;
        Self {
            id: id.map(UserId::get),
            name,
            email,
            age,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            id,
            name,
            email,
            age,
        } = value;
        let user = User::try_new(name, email, age)?;
        match id {
            Some(raw) => Ok(user.with_id(UserId::new(raw)?)),
            None => Ok(user),
        }
    }
}

//! Driving port for user reads and reports.
//!
//! Inbound adapters call this port instead of the record store so handlers
//! never see persistence errors or aggregation details.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AgeCategory, AgeStatistics, Error, User, UserId};

/// Age statistics plus the per-category head count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    /// Aggregate age figures.
    #[serde(flatten)]
    pub ages: AgeStatistics,
    /// Number of users per age category; absent categories are omitted.
    pub age_distribution: BTreeMap<AgeCategory, usize>,
}

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every stored user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user with `id`, or `NotFound`.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// The user holding `email`, or `NotFound`.
    async fn get_user_by_email(&self, email: &str) -> Result<User, Error>;

    /// Users whose name contains `fragment`.
    async fn search_users_by_name(&self, fragment: &str) -> Result<Vec<User>, Error>;

    /// Users with exactly this age.
    async fn users_with_age(&self, age: u32) -> Result<Vec<User>, Error>;

    /// One welcome message per stored user.
    async fn welcome_messages(&self, greeting: &str) -> Result<Vec<String>, Error>;

    /// Statistics over every stored user.
    async fn statistics(&self) -> Result<UserStatistics, Error>;

    /// Stored users grouped by age category.
    async fn users_by_age_category(&self) -> Result<BTreeMap<AgeCategory, Vec<User>>, Error>;
}

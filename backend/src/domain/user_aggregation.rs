//! Derived views over a sequence of users.
//!
//! Inputs arrive in record-store iteration order and every function keeps
//! that order where it returns sequences. Users without an age take part in
//! name and email views but are skipped by every age-based one. All
//! functions are total: empty input produces empty or zero-valued output.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::user_utils::{AgeCategory, classify_by_age, process_users, welcome_message};
use super::User;

fn aged(users: &[User]) -> impl Iterator<Item = (&User, u32)> {
    users
        .iter()
        .filter_map(|user| user.age().map(|age| (user, age)))
}

fn ages(users: &[User]) -> impl Iterator<Item = u32> + '_ {
    users.iter().filter_map(User::age)
}

/// Users whose age is known and strictly greater than `threshold`.
pub fn filter_by_min_age(users: &[User], threshold: u32) -> Vec<User> {
    aged(users)
        .filter(|(_, age)| *age > threshold)
        .map(|(user, _)| user.clone())
        .collect()
}

/// Decade bucket of an age: `age / 10`.
pub fn decade_bucket(age: u32) -> u32 {
    age / 10
}

/// Group users with a known age by decade bucket.
pub fn group_by_age_decade(users: &[User]) -> BTreeMap<u32, Vec<User>> {
    aged(users).fold(BTreeMap::new(), |mut groups, (user, age)| {
        groups
            .entry(decade_bucket(age))
            .or_insert_with(Vec::new)
            .push(user.clone());
        groups
    })
}

/// Summary statistics over user ages.
///
/// `min_age` and `max_age` are zero when no user has an age; they are
/// defaults, not sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeStatistics {
    /// Number of users, with or without an age.
    pub total_users: usize,
    /// Number of users with a known age.
    pub users_with_age: usize,
    /// Mean of the known ages, `0.0` when there are none.
    pub average_age: f64,
    /// Smallest known age.
    pub min_age: u32,
    /// Largest known age.
    pub max_age: u32,
    /// Sum of the known ages.
    pub total_age: u64,
    /// Distinct decade buckets in ascending order.
    pub age_groups: Vec<u32>,
}

/// Compute [`AgeStatistics`] for `users`.
///
/// # Examples
/// ```
/// use roster::domain::{age_statistics, User};
///
/// let users = [
///     User::new("Alice", "alice@example.com", Some(25)),
///     User::new("Grace", "grace@example.com", None),
/// ];
/// let stats = age_statistics(&users);
/// assert_eq!(stats.total_users, 2);
/// assert_eq!(stats.users_with_age, 1);
/// assert_eq!(stats.age_groups, [2]);
/// ```
pub fn age_statistics(users: &[User]) -> AgeStatistics {
    let known: Vec<u32> = ages(users).collect();
    let total_age: u64 = known.iter().map(|age| u64::from(*age)).sum();
    let average_age = if known.is_empty() {
        0.0
    } else {
        total_age as f64 / known.len() as f64
    };

    AgeStatistics {
        total_users: users.len(),
        users_with_age: known.len(),
        average_age,
        min_age: known.iter().copied().min().unwrap_or(0),
        max_age: known.iter().copied().max().unwrap_or(0),
        total_age,
        age_groups: group_by_age_decade(users).into_keys().collect(),
    }
}

/// Group every user under its [`AgeCategory`].
pub fn categorize(users: &[User]) -> BTreeMap<AgeCategory, Vec<User>> {
    users.iter().fold(BTreeMap::new(), |mut groups, user| {
        groups
            .entry(classify_by_age(user.age()))
            .or_insert_with(Vec::new)
            .push(user.clone());
        groups
    })
}

/// Number of users per [`AgeCategory`].
pub fn age_distribution(users: &[User]) -> BTreeMap<AgeCategory, usize> {
    users.iter().fold(BTreeMap::new(), |mut counts, user| {
        *counts.entry(classify_by_age(user.age())).or_insert(0) += 1;
        counts
    })
}

/// One welcome message per user, in input order.
pub fn welcome_messages_for(users: &[User], greeting: &str) -> Vec<String> {
    process_users(users, |user| welcome_message(user.name(), greeting))
}

/// Names in input order.
pub fn user_names(users: &[User]) -> Vec<String> {
    process_users(users, |user| user.name().to_owned())
}

/// `"NAME (age)"` for users with a known age.
pub fn display_info(users: &[User]) -> Vec<String> {
    aged(users)
        .map(|(user, age)| format!("{} ({age})", user.name().to_uppercase()))
        .collect()
}

/// Names grouped by their length in characters.
pub fn group_names_by_length(users: &[User]) -> BTreeMap<usize, Vec<String>> {
    users.iter().fold(BTreeMap::new(), |mut groups, user| {
        groups
            .entry(user.name().chars().count())
            .or_insert_with(Vec::new)
            .push(user.name().to_owned());
        groups
    })
}

/// Names joined with `", "`.
pub fn concatenated_names(users: &[User]) -> String {
    user_names(users).join(", ")
}

/// `"Users: Alice(25); Grace(unknown); "`
pub fn user_summary(users: &[User]) -> String {
    users.iter().fold(String::from("Users: "), |mut summary, user| {
        let age = user
            .age()
            .map_or_else(|| String::from("unknown"), |age| age.to_string());
        summary.push_str(&format!("{}({age}); ", user.name()));
        summary
    })
}

/// Whether any user is known to be older than `age`.
pub fn has_user_older_than(users: &[User], age: u32) -> bool {
    ages(users).any(|known| known > age)
}

/// Whether every user has a non-empty email.
pub fn all_have_email(users: &[User]) -> bool {
    users.iter().all(|user| !user.email().is_empty())
}

/// Whether no user is known to be younger than `age`.
pub fn none_younger_than(users: &[User], age: u32) -> bool {
    !ages(users).any(|known| known < age)
}

/// First user whose name starts with `prefix`.
pub fn find_first_name_starting_with<'a>(users: &'a [User], prefix: &str) -> Option<&'a User> {
    users.iter().find(|user| user.name().starts_with(prefix))
}

/// Oldest user; the first one wins on ties.
pub fn oldest(users: &[User]) -> Option<&User> {
    aged(users)
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(user, _)| user)
}

/// Youngest user; the first one wins on ties.
pub fn youngest(users: &[User]) -> Option<&User> {
    aged(users)
        .reduce(|best, candidate| if candidate.1 < best.1 { candidate } else { best })
        .map(|(user, _)| user)
}

fn aged_users(users: &[User]) -> Vec<User> {
    aged(users).map(|(user, _)| user.clone()).collect()
}

/// Users with a known age, youngest first. Stable for equal ages.
pub fn sort_by_age(users: &[User]) -> Vec<User> {
    let mut sorted = aged_users(users);
    sorted.sort_by_key(User::age);
    sorted
}

/// Users with a known age ordered by age, then name.
pub fn sort_by_age_then_name(users: &[User]) -> Vec<User> {
    let mut sorted = aged_users(users);
    sorted.sort_by(|a, b| a.age().cmp(&b.age()).then_with(|| a.name().cmp(b.name())));
    sorted
}

/// Users with a known age, oldest first. Stable for equal ages.
pub fn sort_by_age_descending(users: &[User]) -> Vec<User> {
    let mut sorted = aged_users(users);
    sorted.sort_by(|a, b| b.age().cmp(&a.age()));
    sorted
}

/// Distinct known ages in first-seen order.
pub fn unique_ages(users: &[User]) -> Vec<u32> {
    let mut seen = HashSet::new();
    ages(users).filter(|age| seen.insert(*age)).collect()
}

/// Distinct name lengths, ascending.
pub fn unique_name_lengths(users: &[User]) -> Vec<usize> {
    let mut lengths: Vec<usize> = users.iter().map(|user| user.name().chars().count()).collect();
    lengths.sort_unstable();
    lengths.dedup();
    lengths
}

/// Split users with a known age into `(age >= pivot, age < pivot)`.
pub fn partition_by_age(users: &[User], pivot: u32) -> (Vec<User>, Vec<User>) {
    let mut at_or_above = Vec::new();
    let mut below = Vec::new();
    for (user, age) in aged(users) {
        if age >= pivot {
            at_or_above.push(user.clone());
        } else {
            below.push(user.clone());
        }
    }
    (at_or_above, below)
}

/// Emails of every user across `groups`, flattened in order.
pub fn flatten_emails(groups: &[Vec<User>]) -> Vec<String> {
    groups
        .iter()
        .flatten()
        .map(|user| user.email().to_owned())
        .collect()
}

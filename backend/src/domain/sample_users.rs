//! Fixture users used for demo seeding and tests.

use super::{User, UserId};

const SAMPLE: [(i64, &str, Option<u32>); 7] = [
    (1, "Alice", Some(25)),
    (2, "Bob", Some(30)),
    (3, "Charlie", Some(35)),
    (4, "Diana", Some(28)),
    (5, "Eve", Some(22)),
    (6, "Frank", Some(40)),
    (7, "Grace", None),
];

/// The seven sample users, ids 1 to 7, with `name@example.com` emails.
///
/// Grace has no recorded age.
pub fn sample_users() -> Vec<User> {
    SAMPLE
        .iter()
        .map(|(raw_id, name, age)| {
            let user = User::new(*name, format!("{}@example.com", name.to_lowercase()), *age);
            match UserId::new(*raw_id) {
                Ok(id) => user.with_id(id),
                Err(_) => user,
            }
        })
        .collect()
}

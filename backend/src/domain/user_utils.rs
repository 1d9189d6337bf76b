//! Validators, formatters and per-user helpers.
//!
//! Everything here is pure and total: no function panics or returns an
//! error, whatever the input.

use std::fmt;
use std::sync::OnceLock;

use chrono::Datelike;
use mockable::Clock;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::User;

/// Greeting used by [`default_welcome_message`].
pub const DEFAULT_GREETING: &str = "Hello";

/// Age at which a user stops being a minor.
pub const ADULT_AGE: u32 = 18;
/// Age at which a user becomes a senior.
pub const SENIOR_AGE: u32 = 65;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Check that `email` has the `local@domain.tld` shape.
///
/// The whole string must match; surrounding whitespace is rejected.
///
/// # Examples
/// ```
/// use roster::domain::is_valid_email;
///
/// assert!(is_valid_email("user+tag@example.org"));
/// assert!(!is_valid_email("test@"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn capitalize_first(part: &str) -> String {
    let lowered = part.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join first and last name, lower-casing each and upper-casing only its
/// first character.
///
/// Only the very first character of each part changes case, so
/// `"mary-jane"` becomes `"Mary-jane"`. Empty parts stay empty.
///
/// # Examples
/// ```
/// use roster::domain::format_name;
///
/// assert_eq!(format_name("ALICE", "smith"), "Alice Smith");
/// assert_eq!(format_name("", "doe"), " Doe");
/// ```
pub fn format_name(first: &str, last: &str) -> String {
    format!("{} {}", capitalize_first(first), capitalize_first(last))
}

/// Age bracket of a user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AgeCategory {
    /// Age not recorded.
    Unknown,
    /// Younger than [`ADULT_AGE`].
    Minor,
    /// From [`ADULT_AGE`] up to, but excluding, [`SENIOR_AGE`].
    Adult,
    /// [`SENIOR_AGE`] or older.
    Senior,
}

impl AgeCategory {
    /// Stable label used in JSON keys and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Minor => "Minor",
            Self::Adult => "Adult",
            Self::Senior => "Senior",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an optional age.
///
/// # Examples
/// ```
/// use roster::domain::{classify_by_age, AgeCategory};
///
/// assert_eq!(classify_by_age(None), AgeCategory::Unknown);
/// assert_eq!(classify_by_age(Some(17)), AgeCategory::Minor);
/// assert_eq!(classify_by_age(Some(65)), AgeCategory::Senior);
/// ```
pub fn classify_by_age(age: Option<u32>) -> AgeCategory {
    match age {
        None => AgeCategory::Unknown,
        Some(age) if age < ADULT_AGE => AgeCategory::Minor,
        Some(age) if age < SENIOR_AGE => AgeCategory::Adult,
        Some(_) => AgeCategory::Senior,
    }
}

/// `"{greeting}, {name}! Welcome to our service."`
pub fn welcome_message(name: &str, greeting: &str) -> String {
    format!("{greeting}, {name}! Welcome to our service.")
}

/// [`welcome_message`] with [`DEFAULT_GREETING`].
pub fn default_welcome_message(name: &str) -> String {
    welcome_message(name, DEFAULT_GREETING)
}

/// `"Name (email)"`.
pub fn display_name(user: &User) -> String {
    format!("{} ({})", user.name(), user.email())
}

/// Apply `processor` to every user, keeping input order.
///
/// # Examples
/// ```
/// use roster::domain::{process_users, welcome_message, User};
///
/// let users = [User::new("John", "john@example.com", None)];
/// let messages = process_users(&users, |user| welcome_message(user.name(), "Hi"));
/// assert_eq!(messages, ["Hi, John! Welcome to our service."]);
/// ```
pub fn process_users<T, F>(users: &[User], processor: F) -> Vec<T>
where
    F: FnMut(&User) -> T,
{
    users.iter().map(processor).collect()
}

/// Age reached this calendar year by someone born in `birth_year`.
///
/// Birth years in the future yield zero.
pub fn age_from_birth_year(birth_year: i32, clock: &dyn Clock) -> u32 {
    let current_year = clock.utc().year();
    u32::try_from(current_year.saturating_sub(birth_year)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::rstest;

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    #[rstest]
    #[case("test@example.com")]
    #[case("user.name@domain.co.jp")]
    #[case("user+tag@example.org")]
    #[case("a_b-c@sub-domain.example.io")]
    fn accepts_well_formed_emails(#[case] email: &str) {
        assert!(is_valid_email(email));
    }

    #[rstest]
    #[case("invalid.email")]
    #[case("@example.com")]
    #[case("test@")]
    #[case("")]
    #[case("test@example")]
    #[case("test@example.c")]
    #[case(" test@example.com")]
    #[case("test@example.com ")]
    #[case("te st@example.com")]
    fn rejects_malformed_emails(#[case] email: &str) {
        assert!(!is_valid_email(email));
    }

    #[rstest]
    #[case("john", "doe", "John Doe")]
    #[case("ALICE", "smith", "Alice Smith")]
    #[case("bob", "JOHNSON", "Bob Johnson")]
    #[case("sean", "O'CONNOR", "Sean O'connor")]
    #[case("mary-jane", "watson", "Mary-jane Watson")]
    #[case("", "doe", " Doe")]
    #[case("john", "", "John ")]
    #[case("", "", " ")]
    fn formats_names(#[case] first: &str, #[case] last: &str, #[case] expected: &str) {
        assert_eq!(format_name(first, last), expected);
    }

    #[rstest]
    fn formatting_is_idempotent() {
        let once = format_name("gRaCe", "HOPPER");
        let (first, last) = once.split_once(' ').expect("two words");
        assert_eq!(format_name(first, last), once);
    }

    #[rstest]
    #[case(None, AgeCategory::Unknown)]
    #[case(Some(0), AgeCategory::Minor)]
    #[case(Some(17), AgeCategory::Minor)]
    #[case(Some(18), AgeCategory::Adult)]
    #[case(Some(64), AgeCategory::Adult)]
    #[case(Some(65), AgeCategory::Senior)]
    #[case(Some(u32::MAX), AgeCategory::Senior)]
    fn classifies_ages(#[case] age: Option<u32>, #[case] expected: AgeCategory) {
        assert_eq!(classify_by_age(age), expected);
    }

    #[rstest]
    fn category_labels_match_display() {
        for category in [
            AgeCategory::Unknown,
            AgeCategory::Minor,
            AgeCategory::Adult,
            AgeCategory::Senior,
        ] {
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[rstest]
    fn welcome_messages_use_greeting() {
        assert_eq!(
            default_welcome_message("John"),
            "Hello, John! Welcome to our service."
        );
        assert_eq!(
            welcome_message("John", "Hi"),
            "Hi, John! Welcome to our service."
        );
    }

    #[rstest]
    fn display_name_includes_email() {
        let user = User::new("John Doe", "john@example.com", Some(30));
        assert_eq!(display_name(&user), "John Doe (john@example.com)");
    }

    #[rstest]
    fn process_users_applies_processor_in_order() {
        let users = [
            User::new("John", "john@example.com", Some(25)),
            User::new("Jane", "jane@example.com", Some(30)),
        ];

        let result = process_users(&users, |user| welcome_message(user.name(), "Hi"));

        assert_eq!(
            result,
            [
                "Hi, John! Welcome to our service.",
                "Hi, Jane! Welcome to our service.",
            ]
        );
    }

    #[rstest]
    #[case(2001, 25)]
    #[case(2026, 0)]
    #[case(2030, 0)]
    fn age_from_birth_year_uses_clock(#[case] birth_year: i32, #[case] expected: u32) {
        let clock = FixtureClock {
            utc_now: Utc
                .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        };
        assert_eq!(age_from_birth_year(birth_year, &clock), expected);
    }
}

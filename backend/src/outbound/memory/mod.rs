//! In-process record store.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. Rows live in a `BTreeMap` keyed by id, so iteration follows
//! ascending id like the PostgreSQL adapter.

mod user_repository;

pub use user_repository::InMemoryUserRepository;

//! Domain primitives, aggregation utilities and services.
//!
//! Purpose: define the user entity, the pure helpers computed over users,
//! and the service that ties them to the record store through ports.
//! Invariants and serialisation contracts live in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) - API error response payload.
//! - User, NewUser, UserId (from `user`) - the user entity and its payloads.
//! - user_utils / user_aggregation - pure validators and derived views.
//! - UserService - implements the user driving ports.

pub mod error;
pub mod ports;
pub mod sample_users;
pub mod trace_id;
pub mod user;
pub mod user_aggregation;
pub mod user_service;
pub mod user_utils;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::sample_users::sample_users;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId, UserValidationError};
pub use self::user_aggregation::*;
pub use self::user_service::UserService;
pub use self::user_utils::*;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use roster::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("no such user"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

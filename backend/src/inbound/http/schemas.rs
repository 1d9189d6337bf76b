//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their JSON
//! shape and register under the domain type's name, keeping framework
//! concerns in the inbound adapter.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with stored state, e.g. a taken email.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency such as the database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "invalid email format: test@")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier; `null` before the first save.
    #[schema(example = 1)]
    id: Option<i64>,
    /// Display name.
    #[schema(example = "Alice")]
    name: String,
    /// Contact email, unique across users.
    #[schema(example = "alice@example.com")]
    email: String,
    /// Age in years; `null` when unknown.
    #[schema(example = 25)]
    age: Option<u32>,
}

/// Head count per age category; categories with no users are omitted.
#[derive(ToSchema)]
#[schema(as = crate::domain::AgeDistribution, rename_all = "PascalCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AgeDistributionSchema {
    unknown: Option<u64>,
    minor: Option<u64>,
    adult: Option<u64>,
    senior: Option<u64>,
}

/// OpenAPI schema for [`crate::domain::ports::UserStatistics`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserStatistics, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserStatisticsSchema {
    #[schema(example = 7)]
    total_users: u64,
    #[schema(example = 6)]
    users_with_age: u64,
    /// `0.0` when no user has an age.
    #[schema(example = 30.0)]
    average_age: f64,
    /// `0` when no user has an age.
    #[schema(example = 22)]
    min_age: u32,
    /// `0` when no user has an age.
    #[schema(example = 40)]
    max_age: u32,
    #[schema(example = 180)]
    total_age: u64,
    /// Distinct decade buckets (`age / 10`), ascending.
    #[schema(example = json!([2, 3, 4]))]
    age_groups: Vec<u32>,
    age_distribution: AgeDistributionSchema,
}

/// Users grouped by age category; categories with no users are omitted.
#[derive(ToSchema)]
#[schema(as = crate::domain::CategorizedUsers, rename_all = "PascalCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CategorizedUsersSchema {
    unknown: Option<Vec<UserSchema>>,
    minor: Option<Vec<UserSchema>>,
    adult: Option<Vec<UserSchema>>,
    senior: Option<Vec<UserSchema>>,
}

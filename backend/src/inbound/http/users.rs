//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! GET    /api/v1/users/search?name=Ali
//! GET    /api/v1/users/by-email?email=alice@example.com
//! GET    /api/v1/users/welcome-messages?greeting=Hi
//! GET    /api/v1/users/statistics
//! GET    /api/v1/users/by-age-category
//! POST   /api/v1/users {"name":"Alice","email":"alice@example.com","age":25}
//! POST   /api/v1/users/with-names?firstName=alice&lastName=smith&email=a@x.io
//! PUT    /api/v1/users/{id} {"name":"Alice","email":"alice@example.com"}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Fixed paths are registered before `/users/{id}` so `search` and friends
//! never reach the id extractor.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{NamedUserRequest, UserStatistics};
use crate::domain::{AgeCategory, DEFAULT_GREETING, Error, NewUser, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CategorizedUsersSchema, ErrorSchema, UserSchema, UserStatisticsSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_age, parse_user_id, require_non_blank,
};

/// Request body for creating or replacing a user.
///
/// Example JSON:
/// `{"name":"Alice","email":"alice@example.com","age":25}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Display name; must not be blank.
    #[schema(example = "Alice")]
    pub name: String,
    /// Contact email in `local@domain.tld` form.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Age in years; omit or send `null` when unknown.
    #[serde(default)]
    #[schema(example = 25, minimum = 0)]
    pub age: Option<i64>,
}

impl TryFrom<UserPayload> for NewUser {
    type Error = Error;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        let UserPayload { name, email, age } = value;
        let name = require_non_blank(name, FieldName::new("name"))?;
        let age = parse_age(age, FieldName::new("age"))?;
        NewUser::try_new(name, email, age).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "name", "code": "empty_field" }))
        })
    }
}

/// Query string for `POST /api/v1/users/with-names`.
#[derive(Debug, Clone, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct NamedUserQuery {
    /// Given name in any case.
    pub first_name: String,
    /// Family name in any case.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Age in years.
    pub age: Option<i64>,
}

impl TryFrom<NamedUserQuery> for NamedUserRequest {
    type Error = Error;

    fn try_from(value: NamedUserQuery) -> Result<Self, Self::Error> {
        let NamedUserQuery {
            first_name,
            last_name,
            email,
            age,
        } = value;
        Ok(Self {
            first_name: require_non_blank(first_name, FieldName::new("firstName"))?,
            last_name: require_non_blank(last_name, FieldName::new("lastName"))?,
            email,
            age: parse_age(age, FieldName::new("age"))?,
        })
    }
}

/// Query string for `GET /api/v1/users/search`.
#[derive(Debug, Clone, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-sensitive substring of the name.
    pub name: String,
}

/// Query string for `GET /api/v1/users/by-email`.
#[derive(Debug, Clone, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Exact email to look up.
    pub email: String,
}

/// Query string for `GET /api/v1/users/welcome-messages`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GreetingQuery {
    /// Greeting to open each message with; defaults to `Hello`.
    pub greeting: Option<String>,
}

/// List every user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use roster::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state.users.get_user(id).await?;
    Ok(web::Json(user))
}

/// Find users whose name contains a substring.
#[utoipa::path(
    get,
    path = "/api/v1/users/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching users", body = [UserSchema]),
        (status = 400, description = "Missing name parameter", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.search_users_by_name(&query.name).await?;
    Ok(web::Json(users))
}

/// Find the user holding an email.
#[utoipa::path(
    get,
    path = "/api/v1/users/by-email",
    params(EmailQuery),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Missing email parameter", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserByEmail"
)]
#[get("/users/by-email")]
pub async fn get_user_by_email(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.get_user_by_email(&query.email).await?;
    Ok(web::Json(user))
}

/// Welcome message for every user.
#[utoipa::path(
    get,
    path = "/api/v1/users/welcome-messages",
    params(GreetingQuery),
    responses((status = 200, description = "Messages in id order", body = [String])),
    tags = ["users"],
    operation_id = "listWelcomeMessages"
)]
#[get("/users/welcome-messages")]
pub async fn welcome_messages(
    state: web::Data<HttpState>,
    query: web::Query<GreetingQuery>,
) -> ApiResult<web::Json<Vec<String>>> {
    let greeting = query.greeting.as_deref().unwrap_or(DEFAULT_GREETING);
    let messages = state.users.welcome_messages(greeting).await?;
    Ok(web::Json(messages))
}

/// Age statistics over every user.
#[utoipa::path(
    get,
    path = "/api/v1/users/statistics",
    responses((status = 200, description = "Statistics", body = UserStatisticsSchema)),
    tags = ["users"],
    operation_id = "getUserStatistics"
)]
#[get("/users/statistics")]
pub async fn user_statistics(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserStatistics>> {
    let stats = state.users.statistics().await?;
    Ok(web::Json(stats))
}

/// Users grouped by age category.
#[utoipa::path(
    get,
    path = "/api/v1/users/by-age-category",
    responses((status = 200, description = "Users per category", body = CategorizedUsersSchema)),
    tags = ["users"],
    operation_id = "getUsersByAgeCategory"
)]
#[get("/users/by-age-category")]
pub async fn users_by_age_category(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<BTreeMap<AgeCategory, Vec<User>>>> {
    let groups = state.users.users_by_age_category().await?;
    Ok(web::Json(groups))
}

/// Create a user from a JSON body.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Created", body = UserSchema),
        (status = 400, description = "Invalid payload or email", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = NewUser::try_from(payload.into_inner())?;
    let user = state.users_command.create_user(draft).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Create a user from name parts passed as query parameters.
#[utoipa::path(
    post,
    path = "/api/v1/users/with-names",
    params(NamedUserQuery),
    responses(
        (status = 201, description = "Created", body = UserSchema),
        (status = 400, description = "Invalid parameters or email", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUserWithNames"
)]
#[post("/users/with-names")]
pub async fn create_user_with_names(
    state: web::Data<HttpState>,
    query: web::Query<NamedUserQuery>,
) -> ApiResult<HttpResponse> {
    let request = NamedUserRequest::try_from(query.into_inner())?;
    let user = state.users_command.create_user_with_names(request).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Replace a user's fields, keeping its id.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated", body = UserSchema),
        (status = 400, description = "Invalid payload or email", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(path.into_inner())?;
    let draft = NewUser::try_from(payload.into_inner())?;
    let user = state.users_command.update_user(id, draft).await?;
    Ok(web::Json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner())?;
    if state.users_command.delete_user(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found(format!("user {id} not found")))
    }
}

/// Register every user handler on `cfg`, fixed paths first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search_users)
        .service(get_user_by_email)
        .service(welcome_messages)
        .service(user_statistics)
        .service(users_by_age_category)
        .service(create_user_with_names)
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

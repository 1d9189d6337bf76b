//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every user and health endpoint together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which keep the
//! domain types free of utoipa derives.
//!
//! Swagger UI serves the document in debug builds; `cargo run --bin
//! openapi-dump` writes it out for external tooling.

use crate::inbound::http::schemas::{
    AgeDistributionSchema, CategorizedUsersSchema, ErrorCodeSchema, ErrorSchema, UserSchema,
    UserStatisticsSchema,
};
use crate::inbound::http::{health, users};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        description = "User records with derived statistics and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        users::list_users,
        users::get_user,
        users::search_users,
        users::get_user_by_email,
        users::welcome_messages,
        users::user_statistics,
        users::users_by_age_category,
        users::create_user,
        users::create_user_with_names,
        users::update_user,
        users::delete_user,
        health::status,
        health::hello,
        health::ready,
        health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        UserStatisticsSchema,
        AgeDistributionSchema,
        CategorizedUsersSchema
    )),
    tags(
        (name = "users", description = "User records and derived views"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const USER_SCHEMA_NAME: &str = "crate.domain.User";
    const STATISTICS_SCHEMA_NAME: &str = "crate.domain.UserStatistics";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "message")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(USER_SCHEMA_NAME, "id")]
    #[case(USER_SCHEMA_NAME, "email")]
    #[case(STATISTICS_SCHEMA_NAME, "averageAge")]
    #[case(STATISTICS_SCHEMA_NAME, "ageDistribution")]
    fn schemas_expose_fields(#[case] schema_name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(schema_name).expect("registered schema");

        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/v1/users")]
    #[case("/api/v1/users/{id}")]
    #[case("/api/v1/users/with-names")]
    #[case("/api/v1/users/statistics")]
    #[case("/api/v1/status")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn user_item_operations_share_one_path() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/v1/users/{id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
    }
}

//! End-to-end tests for the users API over the in-memory record store.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use roster::Trace;
use roster::domain::{TRACE_ID_HEADER, UserService, sample_users};
use roster::inbound::http::state::HttpState;
use roster::inbound::http::{health, users, validation};
use roster::outbound::memory::InMemoryUserRepository;

fn state(seeded: bool) -> HttpState {
    let repo = if seeded {
        InMemoryUserRepository::with_users(sample_users()).expect("unique sample emails")
    } else {
        InMemoryUserRepository::new()
    };
    HttpState::from_service(Arc::new(UserService::new(Arc::new(repo))))
}

async fn app(
    seeded: bool,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state(seeded)))
            .app_data(validation::json_config())
            .app_data(validation::query_config())
            .app_data(validation::path_config())
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .configure(users::configure)
                    .service(health::status)
                    .service(health::hello),
            ),
    )
    .await
}

fn post_user(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(body)
        .to_request()
}

fn put_user(id: i64, body: Value) -> actix_http::Request {
    test::TestRequest::put()
        .uri(&format!("/api/v1/users/{id}"))
        .set_json(body)
        .to_request()
}

fn delete_user(id: i64) -> actix_http::Request {
    test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{id}"))
        .to_request()
}

#[rstest]
#[actix_web::test]
async fn user_lifecycle_round_trip() {
    let app = app(false).await;

    let res = test::call_service(
        &app,
        post_user(json!({ "name": "Alice", "email": "alice@example.com", "age": 25 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_i64().expect("assigned id");
    assert!(id > 0);

    let res = test::call_service(
        &app,
        put_user(id, json!({ "name": "Alice B", "email": "alice@example.com", "age": 26 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Alice B");
    assert_eq!(updated["age"], 26);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    let fetched: Value = test::read_body_json(res).await;
    assert_eq!(fetched, updated);

    let first = test::call_service(&app, delete_user(id)).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    let second = test::call_service(&app, delete_user(id)).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn invalid_email_is_rejected_on_create() {
    let app = app(false).await;

    let res = test::call_service(&app, post_user(json!({ "name": "Bad", "email": "test@" }))).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "email");

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/v1/users").to_request())
        .await;
    let listed: Value = test::read_body_json(res).await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[actix_web::test]
async fn missing_user_is_reported_before_bad_email() {
    let app = app(true).await;

    let res = test::call_service(
        &app,
        put_user(999, json!({ "name": "Ghost", "email": "not-an-email" })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_conflicts() {
    let app = app(true).await;

    let res = test::call_service(
        &app,
        post_user(json!({ "name": "Copy", "email": "alice@example.com" })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[actix_web::test]
async fn named_creation_formats_the_name() {
    let app = app(false).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/users/with-names?firstName=ALICE&lastName=smith&email=as@example.com&age=30")
        .to_request();

    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["name"], "Alice Smith");
    assert_eq!(body["age"], 30);
}

#[rstest]
#[actix_web::test]
async fn statistics_cover_the_sample_users() {
    let app = app(true).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/statistics")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let expected = roster::domain::age_statistics(&sample_users());
    assert_eq!(body["totalUsers"], expected.total_users);
    assert_eq!(body["usersWithAge"], expected.users_with_age);
    assert_eq!(body["minAge"], expected.min_age);
    assert_eq!(body["maxAge"], expected.max_age);
    assert!(body["ageDistribution"].is_object());
}

#[rstest]
#[actix_web::test]
async fn errors_echo_the_trace_header() {
    let app = app(false).await;

    let res = test::call_service(&app, delete_user(42)).await;

    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["traceId"], header.as_str());
}

#[rstest]
#[case("/api/v1/status", "application/json")]
#[case("/api/v1/hello", "text/plain; charset=utf-8")]
#[actix_web::test]
async fn service_endpoints_respond(#[case] uri: &str, #[case] content_type: &str) {
    let app = app(false).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some(content_type)
    );
}

#[rstest]
#[actix_web::test]
async fn ages_beyond_the_storable_range_are_rejected() {
    let app = app(true).await;
    let too_old = i64::from(i32::MAX) + 1;

    let created = test::call_service(
        &app,
        post_user(json!({ "name": "Old", "email": "old@example.com", "age": too_old })),
    )
    .await;
    let updated = test::call_service(
        &app,
        put_user(1, json!({ "name": "Alice", "email": "alice@example.com", "age": too_old })),
    )
    .await;

    for res in [created, updated] {
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "age_out_of_range");
        assert_eq!(body["details"]["field"], "age");
    }
}

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::UserService;
use crate::domain::sample_users;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{users, validation};
use crate::outbound::memory::InMemoryUserRepository;

/// HTTP state over an in-memory store seeded with the sample users.
pub fn seeded_state() -> HttpState {
    let repo = InMemoryUserRepository::with_users(sample_users()).expect("unique sample emails");
    HttpState::from_service(Arc::new(UserService::new(Arc::new(repo))))
}

/// App serving the users API under `/api/v1` with the given state.
pub fn users_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(web::scope("/api/v1").configure(users::configure))
}

//! Health endpoints: liveness and readiness probes plus a plain status
//! report, documented in OpenAPI via utoipa.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};

/// Shared readiness state, flipped once the server has bound its socket.
#[derive(Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Create a state that is not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. 200 once the server can handle traffic, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. 200 whenever the process can answer.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Server is alive"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HealthState::probe_response(true)
}

/// Body of `GET /api/v1/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusResponse {
    /// Always `"UP"` while the process serves requests.
    #[schema(example = "UP")]
    pub status: String,
    /// Human-readable summary.
    #[schema(example = "Application is running")]
    pub message: String,
}

/// Report that the application is running.
#[utoipa::path(
    get,
    path = "/api/v1/status",
    tags = ["health"],
    responses((status = 200, description = "Application status", body = StatusResponse)),
    operation_id = "getStatus"
)]
#[get("/status")]
pub async fn status() -> web::Json<StatusResponse> {
    web::Json(StatusResponse {
        status: "UP".to_owned(),
        message: "Application is running".to_owned(),
    })
}

/// Greeting returned by `GET /api/v1/hello`.
pub const HELLO_MESSAGE: &str = "Hello, Roster!";

/// Plain-text greeting.
#[utoipa::path(
    get,
    path = "/api/v1/hello",
    tags = ["health"],
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain")),
    operation_id = "hello"
)]
#[get("/hello")]
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(HELLO_MESSAGE)
}

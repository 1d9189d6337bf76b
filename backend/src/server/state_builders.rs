//! Builders for the record store and the HTTP state served over it.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use roster::domain::ports::{UserPersistenceError, UserRepository};
use roster::domain::{UserService, sample_users};
use roster::inbound::http::state::HttpState;
use roster::outbound::memory::InMemoryUserRepository;
use roster::outbound::persistence::{DbPool, DieselUserRepository};

/// Pick the PostgreSQL adapter when a pool is available, otherwise an empty
/// in-memory store.
fn build_repository_with_pool<Pool, R, MakeRepo>(
    pool: Option<&Pool>,
    make_repo: MakeRepo,
) -> Arc<dyn UserRepository>
where
    R: UserRepository + 'static,
    MakeRepo: FnOnce(&Pool) -> R,
{
    match pool {
        Some(pool) => Arc::new(make_repo(pool)),
        None => Arc::new(InMemoryUserRepository::new()),
    }
}

/// Record store for the configured backend.
pub(crate) fn build_repository(pool: Option<&DbPool>) -> Arc<dyn UserRepository> {
    build_repository_with_pool(pool, |pool| DieselUserRepository::new(pool.clone()))
}

/// Save the sample users into `repository` when it holds no rows.
///
/// Returns how many users were written; a populated store is left alone.
pub(crate) async fn seed_sample_users(
    repository: &dyn UserRepository,
) -> Result<usize, UserPersistenceError> {
    if !repository.find_all().await?.is_empty() {
        info!("user store already populated; skipping sample users");
        return Ok(0);
    }
    let seeds = sample_users();
    for user in &seeds {
        repository.save(user).await?;
    }
    info!(count = seeds.len(), "seeded sample users");
    Ok(seeds.len())
}

/// HTTP state whose query and command ports share one [`UserService`].
pub(crate) fn build_http_state(repository: Arc<dyn UserRepository>) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_service(Arc::new(UserService::new(
        repository,
    ))))
}

use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::handlers::{companies, jobs, system};
use crate::middleware::{authenticate_jwt, require_access, Access};

/// Shared per-process state; the pool is the only thing requests share
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(company_routes())
        .merge(job_routes())
        .fallback(system::not_found)
        // Global middleware
        .layer(middleware::from_fn(authenticate_jwt))
        .layer(DefaultBodyLimit::max(config::config().api.max_request_size_bytes))
        .layer(cors_layer());

    if config::config().api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn company_routes() -> Router<AppState> {
    let admin = middleware::from_fn_with_state(Access::Admin, require_access);

    Router::new()
        .route(
            "/companies",
            get(companies::list).post(companies::create.layer(admin.clone())),
        )
        .route(
            "/companies/:handle",
            get(companies::get)
                .patch(companies::update.layer(admin.clone()))
                .delete(companies::remove.layer(admin)),
        )
}

fn job_routes() -> Router<AppState> {
    let admin = middleware::from_fn_with_state(Access::Admin, require_access);

    Router::new()
        .route("/jobs", get(jobs::list).post(jobs::create.layer(admin.clone())))
        .route(
            "/jobs/:id",
            get(jobs::get)
                .patch(jobs::update.layer(admin.clone()))
                .delete(jobs::remove.layer(admin)),
        )
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use service_core::axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ComplaintConfig;
use crate::services::{
    ComplaintService, IdGenerator, InMemoryUserStore, RandomIdGenerator, SessionStore, UserStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: ComplaintConfig,
    pub complaints: ComplaintService,
    pub sessions: SessionStore,
}

impl AppState {
    /// In-memory store and an entropy-seeded generator.
    pub fn new(config: ComplaintConfig) -> Self {
        Self::with_parts(
            config,
            Arc::new(InMemoryUserStore::new()),
            Arc::new(RandomIdGenerator::from_entropy()),
        )
    }

    pub fn with_parts(
        config: ComplaintConfig,
        store: Arc<dyn UserStore>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let complaints = ComplaintService::new(store, ids, config.ids.max_attempts);
        let sessions = SessionStore::new(config.sessions.ttl());

        Self {
            config,
            complaints,
            sessions,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Admin routes. The key check wraps only the matched methods, so a wrong
    // method still gets the 405 envelope.
    let admin_auth = from_fn_with_state(state.clone(), middleware::admin_auth_middleware);
    let admin_routes = Router::new()
        .route(
            "/getAllComplaintsForAdmin",
            get(handlers::list_all_complaints)
                .route_layer(admin_auth.clone())
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/resolveComplaint",
            put(handlers::resolve_complaint)
                .route_layer(admin_auth)
                .fallback(handlers::method_not_allowed),
        );

    let cors = cors_layer(&state.config.security.allowed_origins);

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .route(
            "/register",
            post(handlers::register).fallback(handlers::method_not_allowed),
        )
        .route(
            "/login",
            post(handlers::login).fallback(handlers::method_not_allowed),
        )
        .route(
            "/logout",
            post(handlers::logout).fallback(handlers::method_not_allowed),
        )
        .route(
            "/submitComplaint",
            post(handlers::submit_complaint).fallback(handlers::method_not_allowed),
        )
        .route(
            "/viewComplaint",
            get(handlers::view_complaint).fallback(handlers::method_not_allowed),
        )
        .route(
            "/getAllComplaintsForUser",
            get(handlers::list_user_complaints).fallback(handlers::method_not_allowed),
        )
        .merge(admin_routes)
        .fallback(handlers::not_found)
        .with_state(state)
        // Add metrics middleware
        .layer(from_fn(metrics_middleware))
        // Add tracing layer
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &service_core::axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(middleware::ADMIN_API_KEY_HEADER),
        ]);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Service health check
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let users = state.complaints.user_count().await.map_err(|e| {
        tracing::error!(error = %e, "User store health check failed");
        AppError::from(e)
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "environment": format!("{:?}", state.config.environment),
        "checks": {
            "store": "up",
            "users": users
        }
    })))
}

use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::get_user::get_user;
use super::handlers::login::login;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::InMemoryUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<InMemoryUserRepository>>,
    pub authenticator: Arc<Authenticator>,
    pub access_token_duration: chrono::Duration,
}

pub fn create_router(
    user_service: Arc<UserService<InMemoryUserRepository>>,
    authenticator: Arc<Authenticator>,
    access_token_duration: chrono::Duration,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        access_token_duration,
    };

    let public_routes = Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/login", post(login));

    let protected_routes = Router::new()
        .route("/api/users/:username", get(get_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // No headers on the span: protected requests carry bearer tokens in theirs
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|_request: &Request<Body>, _span: &Span| {
            tracing::debug!("Started processing request");
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Finished processing request"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

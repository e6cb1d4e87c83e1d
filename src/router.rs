use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::require_auth;
use crate::modules::auth::{init_protected_auth_router, init_public_auth_router};
use crate::modules::bookings::init_bookings_router;
use crate::modules::subscriptions::init_subscriptions_router;
use crate::state::AppState;

async fn greeting() -> &'static str {
    "Hello world from api"
}

pub fn init_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(init_protected_auth_router())
        .nest("/bookings", init_bookings_router())
        .nest("/subscriptions", init_subscriptions_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .route("/", get(greeting))
                .merge(init_public_auth_router())
                .merge(protected),
        )
        .with_state(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging_middleware))
                .layer(cors_layer(&state)),
        )
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

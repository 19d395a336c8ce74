pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::analysis::handlers;
use crate::config::AllowedOrigins;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

/// CORS policy: credentials allowed, methods and headers mirrored from the
/// request. `Any` mirrors the caller's origin since a literal `*` cannot be
/// combined with credentials.
pub fn build_cors(origins: &AllowedOrigins) -> Result<CorsLayer> {
    let allow_origin = match origins {
        AllowedOrigins::Any => AllowOrigin::mirror_request(),
        AllowedOrigins::List(list) => {
            let values = list
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: '{origin}'"))
                })
                .collect::<Result<Vec<_>>>()?;
            AllowOrigin::list(values)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

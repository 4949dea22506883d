use axum::{middleware, routing::get, Router};

use crate::auth::require_basic_auth;
use crate::handlers::{handle_edit, handle_favicon, handle_root, handle_save, handle_view};
use crate::logger::access_log;
use crate::types::AppState;

/// Route table. Only the edit route sits behind Basic auth.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/:title/edit", get(handle_edit))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_basic_auth));

    Router::new()
        .route("/", get(handle_root))
        .route("/favicon.ico", get(handle_favicon))
        .route("/:title", get(handle_view).post(handle_save))
        .merge(protected)
        .layer(middleware::from_fn(access_log))
        .with_state(state)
}

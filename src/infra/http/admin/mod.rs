mod auth;
mod posts;
mod state;

pub use state::AdminState;

use axum::{Router, middleware, routing::get};

use self::auth::require_admin;

/// Admin editor routes. Every route sits behind [`require_admin`], which runs
/// before any extractor reads the request body.
pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/posts/admin", get(posts::admin_posts_index))
        .route(
            "/posts/admin/{slug}",
            get(posts::admin_post_editor).post(posts::admin_post_submit),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .with_state(state)
}

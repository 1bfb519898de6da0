//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`.
//! Middleware: CORS, tracing.
//!
//! In production, the built web client is served from the directory named
//! by `SENPAI_WEB_DIR`. API routes take priority; unknown paths fall
//! through to the client's `index.html` for client-side routing. If the
//! directory does not exist, only the API is served.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Character CRUD (mutations admin-gated inside the handlers)
        .route(
            "/characters",
            get(handlers::character::list_characters).post(handlers::character::create_character),
        )
        .route(
            "/characters/{id}",
            get(handlers::character::get_character)
                .patch(handlers::character::update_character)
                .delete(handlers::character::delete_character),
        )
        // Chat history
        .route(
            "/characters/{id}/messages",
            get(handlers::message::list_messages)
                .post(handlers::message::send_message)
                .delete(handlers::message::clear_messages),
        )
        // Sessions
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/user", get(handlers::auth::current_user));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the built web client from disk if the directory exists.
    // API routes and /health take priority; unknown paths fall through
    // to index.html for client-side routing.
    if let Ok(web_dir) = std::env::var("SENPAI_WEB_DIR") {
        if std::path::Path::new(&web_dir).exists() {
            let index_path = format!("{}/index.html", web_dir);
            let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir, "static file serving enabled");
        }
    }

    router
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /movies          GET   single search or discovery (?query=)
/// /trending        GET   most searched terms (?limit=)
/// /ws              GET   WebSocket search session
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(handlers::movies::search_movies))
        .route("/trending", get(handlers::trending::top_searches))
        .route("/ws", get(ws::handler::ws_handler))
}

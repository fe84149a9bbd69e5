//! One-shot movie search.
//!
//! Each request gets its own dispatcher, so there is no cross-request
//! staleness to reconcile; debouncing is the WebSocket session's job.

use axum::extract::{Query, State};
use axum::Json;
use reel_core::state::RequestState;

use crate::query::MovieSearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/movies?query=
///
/// Always 200: catalog failures are reported inside the returned state.
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieSearchParams>,
) -> Json<DataResponse<RequestState>> {
    let dispatcher = state.pipeline.dispatcher();
    let result = dispatcher.dispatch(&params.query).await;
    tracing::debug!(
        query = %params.query,
        movies = result.movies().len(),
        error = result.error_message().unwrap_or_default(),
        "Movie search served"
    );
    Json(DataResponse { data: result })
}

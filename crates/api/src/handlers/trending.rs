use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use reel_core::types::SearchCountRecord;

use crate::error::{AppError, AppResult};
use crate::query::TrendingParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/trending?limit=
///
/// A store failure yields an empty list, not an error response. A
/// non-numeric `limit` is a 400 in the usual error shape.
pub async fn top_searches(
    State(state): State<AppState>,
    params: Result<Query<TrendingParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Vec<SearchCountRecord>>>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let limit = params.resolve(state.pipeline.config().trending_limit);

    let records = state.pipeline.trending_loader().load_top(limit).await;
    Ok(Json(DataResponse { data: records }))
}

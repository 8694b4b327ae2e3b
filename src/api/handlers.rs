use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::db::Decode;
use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{LastTrackResponse, NextTrackResponse, PlaybackEvent, Track, TrackId, UserId};
use crate::services::data_logger::Datum;

use super::AppState;

/// Liveness banner
pub async fn hello() -> Json<Value> {
    Json(json!({
        "status": "alive",
        "message": "welcome to botify, the best toy music recommender"
    }))
}

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Get a catalog track
pub async fn get_track(
    State(state): State<AppState>,
    Path(track): Path<TrackId>,
) -> AppResult<Json<Track>> {
    let bytes = state
        .stores
        .tracks
        .get(track)
        .await?
        .ok_or(AppError::TrackNotFound(track))?;

    Ok(Json(Track::decode(&bytes)?))
}

/// Recommend the track to play after `event.track`
pub async fn next_track(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user): Path<UserId>,
    payload: Result<Json<PlaybackEvent>, JsonRejection>,
) -> AppResult<Json<NextTrackResponse>> {
    let start = Instant::now();
    let Json(event) = payload?;

    let (treatment, recommender) = state.recommender_for(user);

    let track = recommender
        .recommend_next(user, event.track, event.time)
        .await
        .map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                user,
                prev_track = event.track,
                error = %e,
                "Next track recommendation failed"
            );
            e
        })?;

    let latency = start.elapsed().as_secs_f64();
    state
        .data_logger
        .log(Datum::next(user, event, latency, track));

    tracing::info!(
        request_id = %request_id,
        user,
        treatment = %treatment,
        recommender = recommender.name(),
        prev_track = event.track,
        time = event.time,
        track,
        "Recommended next track"
    );

    Ok(Json(NextTrackResponse { user, track }))
}

/// Record the last track of a session
pub async fn last_track(
    State(state): State<AppState>,
    Path(user): Path<UserId>,
    payload: Result<Json<PlaybackEvent>, JsonRejection>,
) -> AppResult<Json<LastTrackResponse>> {
    let start = Instant::now();
    let Json(event) = payload?;

    state
        .data_logger
        .log(Datum::last(user, event, start.elapsed().as_secs_f64()));

    Ok(Json(LastTrackResponse { user }))
}

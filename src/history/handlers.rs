use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::error::ServiceError;
use crate::history::dto::{HistoryItem, Message, TopQuery};
use crate::history::repo;
use crate::state::AppState;

pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/history/:username",
            get(list_history).post(add_history).delete(clear_history),
        )
        .route("/api/top_cities/:username", get(top_cities))
}

#[instrument(skip(state, payload))]
pub async fn add_history(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<HistoryItem>,
) -> Result<Json<Message>, ServiceError> {
    repo::add(&state.db, &username, &payload.city).await?;
    info!(%username, city = %payload.city, "history entry added");
    Ok(Json(Message {
        message: "added to history".into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_history(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<HistoryItem>>, ServiceError> {
    let cities = repo::list(&state.db, &username).await?;
    Ok(Json(
        cities.into_iter().map(|city| HistoryItem { city }).collect(),
    ))
}

#[instrument(skip(state))]
pub async fn top_cities(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<String>>, ServiceError> {
    let cities = repo::top(&state.db, &username, query.limit).await?;
    Ok(Json(cities))
}

#[instrument(skip(state))]
pub async fn clear_history(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Message>, ServiceError> {
    repo::clear(&state.db, &username).await?;
    info!(%username, "history cleared");
    Ok(Json(Message {
        message: "history cleared".into(),
    }))
}

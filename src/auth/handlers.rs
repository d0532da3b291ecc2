use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::dto::{Credentials, DefaultCityRequest, LoginResponse, Message};
use crate::auth::repo_types::User;
use crate::auth::services;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/default_city/:username", post(set_default_city))
        .route("/api/user/:username", delete(delete_account))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<Message>, ServiceError> {
    let user = services::register(&state.db, &payload.username, &payload.password).await?;
    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(Json(Message {
        message: "registered".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<LoginResponse>, ServiceError> {
    let user = services::login(&state.db, &payload.username, &payload.password).await?;
    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        message: "logged in".into(),
        username: user.username,
    }))
}

#[instrument(skip(state, payload))]
pub async fn set_default_city(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<DefaultCityRequest>,
) -> Result<Json<Message>, ServiceError> {
    User::set_default_city(&state.db, &username, &payload.city).await?;
    info!(%username, city = %payload.city, "default city set");
    Ok(Json(Message {
        message: format!("default city set to {}", payload.city),
    }))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Message>, ServiceError> {
    services::delete_account(&state.db, &username).await?;
    info!(%username, "account deleted");
    Ok(Json(Message {
        message: "account deleted".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_hides_nothing_but_the_hash() {
        let response = LoginResponse {
            message: "logged in".into(),
            username: "alice".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("alice"));
        assert!(json.contains("message"));
    }
}

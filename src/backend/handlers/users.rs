use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::backend::{auth, AppState};
use crate::database::db::queries;
use crate::error::{ApiError, ApiResult};
use crate::validation::{validate_registration, RegistrationDraft};

pub async fn register(
    State(state): State<AppState>,
    Json(draft): Json<RegistrationDraft>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    // normalized the same way the validator does, for the uniqueness lookups
    let username = draft.username.trim().to_string();
    let email = draft.email.trim().to_lowercase();
    let username_taken = queries::username_exists(&state.db, &username).await?;
    let email_taken = queries::email_exists(&state.db, &email).await?;

    let valid = validate_registration(&draft, username_taken, email_taken)?;
    let password_hash = auth::hash_password(&valid.password)?;

    let user_id = queries::create_user(
        &state.db,
        &valid.username,
        &valid.email,
        &password_hash,
        valid.first_name.as_deref(),
        valid.last_name.as_deref(),
    )
    .await?;
    let user = queries::get_user_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let tokens = auth::issue_token_pair(&state.db, user_id).await?;
    info!("registered user {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": user,
            "refresh": tokens.refresh,
            "access": tokens.access,
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<Value>> {
    let user = queries::get_user_by_username(&state.db, request.username.trim()).await?;

    // same rejection whether the user is unknown or the password is wrong
    let user = match user {
        Some(u) if auth::verify_password(&request.password, &u.password_hash) => u,
        _ => {
            return Err(ApiError::Auth(
                "No active account found with the given credentials.".to_string(),
            ))
        }
    };

    let tokens = auth::issue_token_pair(&state.db, user.user_id).await?;

    Ok(Json(json!({
        "refresh": tokens.refresh,
        "access": tokens.access,
    })))
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<Json<Value>> {
    let access = auth::refresh_access_token(&state.db, &request.refresh).await?;
    Ok(Json(json!({ "access": access })))
}

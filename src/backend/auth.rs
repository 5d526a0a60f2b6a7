use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::async_trait;
use chrono::{Duration, Utc};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::backend::AppState;
use crate::database::db::queries;
use crate::error::{ApiError, ApiResult};

const ACCESS_TOKEN_TTL_HOURS: i64 = 1;
const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

/*
Token issuance is deliberately dumb: opaque uuid bearer tokens stored
server-side, one access/refresh pair per login, refresh rotating the access
token in place. Passwords are only ever persisted as Argon2 hashes.
 */

pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub async fn issue_token_pair(pool: &Pool<Sqlite>, user_id: i64) -> ApiResult<TokenPair> {
    let access = Uuid::new_v4().simple().to_string();
    let refresh = Uuid::new_v4().simple().to_string();
    let now = Utc::now().naive_utc();

    queries::create_auth_token(
        pool,
        user_id,
        &access,
        &refresh,
        now + Duration::hours(ACCESS_TOKEN_TTL_HOURS),
        now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
    )
    .await?;

    Ok(TokenPair { access, refresh })
}

pub async fn refresh_access_token(pool: &Pool<Sqlite>, refresh_token: &str) -> ApiResult<String> {
    let token = queries::get_token_by_refresh(pool, refresh_token)
        .await?
        .ok_or_else(|| ApiError::Auth("Token is invalid or expired.".to_string()))?;

    let now = Utc::now().naive_utc();
    if token.refresh_expires_at <= now {
        return Err(ApiError::Auth("Token is invalid or expired.".to_string()));
    }

    let access = Uuid::new_v4().simple().to_string();
    queries::rotate_access_token(
        pool,
        token.token_id,
        &access,
        now + Duration::hours(ACCESS_TOKEN_TTL_HOURS),
    )
    .await?;

    Ok(access)
}

// The authenticated caller. Handlers take this as an extractor and pass the
// user id explicitly into validation/query/aggregation calls.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::Auth("Authentication credentials were not provided.".to_string())
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Auth("Authentication credentials were not provided.".to_string())
        })?;

        let record = queries::get_token_by_access(&state.db, token)
            .await?
            .ok_or_else(|| ApiError::Auth("Invalid or expired token.".to_string()))?;

        if record.access_expires_at <= Utc::now().naive_utc() {
            return Err(ApiError::Auth("Invalid or expired token.".to_string()));
        }

        Ok(AuthUser {
            user_id: record.user_id,
        })
    }
}

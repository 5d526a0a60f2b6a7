use chrono::NaiveDateTime;
use sqlx::FromRow;

// One row per login. The access token is rotated in place on refresh.
#[derive(Debug, Clone, FromRow)]
pub struct AuthToken {
    pub token_id: i64,
    pub user_id: i64,
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: NaiveDateTime,
    pub refresh_expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::backend::auth::AuthUser;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::Category;
use crate::error::{ApiError, ApiResult};
use crate::filters::CategoryQuery;
use crate::validation::{validate_category, CategoryDraft, CategoryPatch};

// Unpaginated; a user's category set stays small.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories =
        queries::get_categories_for_user(&state.db, user.user_id, query.parsed()).await?;
    Ok(Json(categories))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(draft): Json<CategoryDraft>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let siblings = queries::get_categories_for_user(&state.db, user.user_id, None).await?;
    let valid = validate_category(&draft, &siblings, None)?;

    let category_id = queries::create_category(&state.db, user.user_id, &valid).await?;
    let category = queries::get_category_owned(&state.db, user.user_id, category_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category_id): Path<i64>,
) -> ApiResult<Json<Category>> {
    queries::get_category_owned(&state.db, user.user_id, category_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category_id): Path<i64>,
    Json(patch): Json<CategoryPatch>,
) -> ApiResult<Json<Category>> {
    let existing = queries::get_category_owned(&state.db, user.user_id, category_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let siblings = queries::get_categories_for_user(&state.db, user.user_id, None).await?;
    let draft = patch.apply(&existing);
    let valid = validate_category(&draft, &siblings, Some(category_id))?;

    queries::update_category(&state.db, user.user_id, category_id, &valid).await?;
    let category = queries::get_category_owned(&state.db, user.user_id, category_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(category))
}

pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category_id): Path<i64>,
) -> ApiResult<StatusCode> {
    queries::get_category_owned(&state.db, user.user_id, category_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    // restrict-delete: refuse while transactions reference the category
    if queries::count_transactions_for_category(&state.db, category_id).await? > 0 {
        return Err(ApiError::Conflict(
            "Cannot delete a category that still has transactions.".to_string(),
        ));
    }

    // the FOREIGN KEY RESTRICT is the backstop if a transaction lands between
    // the check and the delete
    match queries::delete_category(&state.db, user.user_id, category_id).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(sqlx::Error::Database(db))
            if db.kind() == sqlx::error::ErrorKind::ForeignKeyViolation =>
        {
            Err(ApiError::Conflict(
                "Cannot delete a category that still has transactions.".to_string(),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

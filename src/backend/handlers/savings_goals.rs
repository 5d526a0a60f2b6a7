use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::backend::auth::AuthUser;
use crate::backend::handlers::today;
use crate::backend::pagination::{PageParams, Paginated};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::SavingsGoal;
use crate::error::{ApiError, ApiResult};
use crate::validation::{validate_savings_goal, SavingsGoalDraft, SavingsGoalPatch};

// No filters beyond owner-scoping.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Paginated<SavingsGoal>>> {
    let count = queries::count_savings_goals(&state.db, user.user_id).await?;
    let results =
        queries::list_savings_goals(&state.db, user.user_id, page.limit(), page.offset()).await?;

    Ok(Json(Paginated::new(count, &page, results)))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(draft): Json<SavingsGoalDraft>,
) -> ApiResult<(StatusCode, Json<SavingsGoal>)> {
    let valid = validate_savings_goal(&draft, today(), true)?;

    let goal_id = queries::create_savings_goal(&state.db, user.user_id, &valid).await?;
    let goal = queries::get_savings_goal_owned(&state.db, user.user_id, goal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(goal_id): Path<i64>,
) -> ApiResult<Json<SavingsGoal>> {
    queries::get_savings_goal_owned(&state.db, user.user_id, goal_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(goal_id): Path<i64>,
    Json(patch): Json<SavingsGoalPatch>,
) -> ApiResult<Json<SavingsGoal>> {
    let existing = queries::get_savings_goal_owned(&state.db, user.user_id, goal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    // a deadline left untouched by the patch is not re-checked against today
    let check_deadline = patch.deadline.is_some();
    let draft = patch.apply(&existing);
    let valid = validate_savings_goal(&draft, today(), check_deadline)?;

    queries::update_savings_goal(&state.db, user.user_id, goal_id, &valid).await?;
    let goal = queries::get_savings_goal_owned(&state.db, user.user_id, goal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(goal))
}

pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(goal_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = queries::delete_savings_goal(&state.db, user.user_id, goal_id).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

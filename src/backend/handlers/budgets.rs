use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::backend::auth::AuthUser;
use crate::backend::handlers::today;
use crate::backend::pagination::{PageParams, Paginated};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::Budget;
use crate::error::{ApiError, ApiResult};
use crate::filters::BudgetQuery;
use crate::validation::{validate_budget, BudgetDraft, BudgetPatch};

pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BudgetQuery>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Paginated<Budget>>> {
    let filter = query.parsed();
    let count = queries::count_budgets(&state.db, user.user_id, &filter).await?;
    let results =
        queries::list_budgets(&state.db, user.user_id, &filter, page.limit(), page.offset())
            .await?;

    Ok(Json(Paginated::new(count, &page, results)))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(draft): Json<BudgetDraft>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let category = queries::get_category_any(&state.db, draft.category_id).await?;
    let valid = validate_budget(&draft, user.user_id, today(), category.as_ref(), false)?;

    let budget_id = queries::create_budget(&state.db, user.user_id, &valid).await?;
    let budget = queries::get_budget_owned(&state.db, user.user_id, budget_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::CREATED, Json(budget)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(budget_id): Path<i64>,
) -> ApiResult<Json<Budget>> {
    queries::get_budget_owned(&state.db, user.user_id, budget_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(budget_id): Path<i64>,
    Json(patch): Json<BudgetPatch>,
) -> ApiResult<Json<Budget>> {
    let existing = queries::get_budget_owned(&state.db, user.user_id, budget_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let draft = patch.apply(&existing);
    let category = queries::get_category_any(&state.db, draft.category_id).await?;
    // the start-date-in-the-past check only applies on creation
    let valid = validate_budget(&draft, user.user_id, today(), category.as_ref(), true)?;

    queries::update_budget(&state.db, user.user_id, budget_id, &valid).await?;
    let budget = queries::get_budget_owned(&state.db, user.user_id, budget_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(budget))
}

pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(budget_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = queries::delete_budget(&state.db, user.user_id, budget_id).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::backend::auth::AuthUser;
use crate::backend::handlers::today;
use crate::backend::pagination::{PageParams, Paginated};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::{Budget, Category, Transaction};
use crate::error::{ApiError, ApiResult};
use crate::filters::TransactionQuery;
use crate::validation::{
    validate_transaction, TransactionDraft, TransactionPatch, TransactionRefs,
};

// Looks up the rows the draft references so the validator can check existence
// and ownership without touching the database itself.
async fn fetch_refs(
    state: &AppState,
    draft: &TransactionDraft,
) -> ApiResult<(Option<Category>, Option<Budget>)> {
    let category = queries::get_category_any(&state.db, draft.category_id).await?;
    let budget = match draft.budget_id {
        Some(budget_id) => queries::get_budget_any(&state.db, budget_id).await?,
        None => None,
    };
    Ok((category, budget))
}

pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TransactionQuery>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Paginated<Transaction>>> {
    let filter = query.parsed();
    let count = queries::count_transactions(&state.db, user.user_id, &filter).await?;
    let results = queries::list_transactions(
        &state.db,
        user.user_id,
        &filter,
        page.limit(),
        page.offset(),
    )
    .await?;

    Ok(Json(Paginated::new(count, &page, results)))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(draft): Json<TransactionDraft>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let (category, budget) = fetch_refs(&state, &draft).await?;
    let refs = TransactionRefs {
        category: category.as_ref(),
        budget: budget.as_ref(),
    };
    let valid = validate_transaction(&draft, user.user_id, today(), refs)?;

    let transaction_id = queries::create_transaction(&state.db, user.user_id, &valid).await?;
    let transaction = queries::get_transaction_owned(&state.db, user.user_id, transaction_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<i64>,
) -> ApiResult<Json<Transaction>> {
    queries::get_transaction_owned(&state.db, user.user_id, transaction_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<i64>,
    Json(patch): Json<TransactionPatch>,
) -> ApiResult<Json<Transaction>> {
    let existing = queries::get_transaction_owned(&state.db, user.user_id, transaction_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let draft = patch.apply(&existing);
    let (category, budget) = fetch_refs(&state, &draft).await?;
    let refs = TransactionRefs {
        category: category.as_ref(),
        budget: budget.as_ref(),
    };
    let valid = validate_transaction(&draft, user.user_id, today(), refs)?;

    queries::update_transaction(&state.db, user.user_id, transaction_id, &valid).await?;
    let transaction = queries::get_transaction_owned(&state.db, user.user_id, transaction_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(transaction))
}

pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = queries::delete_transaction(&state.db, user.user_id, transaction_id).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

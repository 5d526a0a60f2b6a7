use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};

use crate::backend::auth::AuthUser;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::error::ApiResult;
use crate::filters::ReportQuery;
use crate::reports;

pub async fn income_expenses(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<reports::IncomeExpenseTotals>> {
    let entries = queries::fetch_report_entries(&state.db, user.user_id, &query.parsed()).await?;
    Ok(Json(reports::income_expense_totals(&entries)))
}

pub async fn income_expense_trends(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Value>> {
    let entries = queries::fetch_report_entries(&state.db, user.user_id, &query.parsed()).await?;
    let trends = reports::income_expense_trends(&entries, query.timeframe());
    Ok(Json(json!({ "trends": trends })))
}

pub async fn net_worth(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<reports::NetWorthReport>> {
    let entries = queries::fetch_report_entries(&state.db, user.user_id, &query.parsed()).await?;
    // savings are never date-filtered
    let goals = queries::get_all_savings_goals(&state.db, user.user_id).await?;
    Ok(Json(reports::net_worth(&entries, &goals)))
}

pub async fn budget_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Value>> {
    let budgets = queries::budgets_with_category(&state.db, user.user_id).await?;
    let linked = queries::transactions_linked_to_budgets(&state.db, user.user_id).await?;
    let spent = reports::sum_by_budget(&linked);
    let alerts = reports::budget_alerts(&budgets, &spent);
    Ok(Json(json!({ "alerts": alerts })))
}

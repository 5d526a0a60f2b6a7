use axum::routing::{get, post};
use axum::Router;

use crate::backend::{handlers, AppState};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(handlers::users::register))
        .route("/api/login", post(handlers::users::login))
        .route("/api/token/refresh", post(handlers::users::refresh_token))
        .route(
            "/api/categories",
            get(handlers::categories::list).post(handlers::categories::create),
        )
        .route(
            "/api/categories/:id",
            get(handlers::categories::retrieve)
                .put(handlers::categories::update)
                .patch(handlers::categories::update)
                .delete(handlers::categories::destroy),
        )
        .route(
            "/api/transactions",
            get(handlers::transactions::list).post(handlers::transactions::create),
        )
        .route(
            "/api/transactions/:id",
            get(handlers::transactions::retrieve)
                .put(handlers::transactions::update)
                .patch(handlers::transactions::update)
                .delete(handlers::transactions::destroy),
        )
        .route(
            "/api/budgets",
            get(handlers::budgets::list).post(handlers::budgets::create),
        )
        .route(
            "/api/budgets/:id",
            get(handlers::budgets::retrieve)
                .put(handlers::budgets::update)
                .patch(handlers::budgets::update)
                .delete(handlers::budgets::destroy),
        )
        .route(
            "/api/savingsgoals",
            get(handlers::savings_goals::list).post(handlers::savings_goals::create),
        )
        .route(
            "/api/savingsgoals/:id",
            get(handlers::savings_goals::retrieve)
                .put(handlers::savings_goals::update)
                .patch(handlers::savings_goals::update)
                .delete(handlers::savings_goals::destroy),
        )
        .route(
            "/api/reports/income-expenses",
            get(handlers::reports::income_expenses),
        )
        .route(
            "/api/reports/income-expense-trends",
            get(handlers::reports::income_expense_trends),
        )
        .route("/api/reports/net-worth", get(handlers::reports::net_worth))
        .route(
            "/api/budget-notifications",
            get(handlers::reports::budget_notifications),
        )
}

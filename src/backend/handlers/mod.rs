pub mod budgets;
pub mod categories;
pub mod reports;
pub mod savings_goals;
pub mod transactions;
pub mod users;

use chrono::NaiveDate;

// Validation rules that compare against "today" are evaluated at request time.
pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// amount is stored as TEXT in SQLite and decoded with Decimal::from_str,
// so rows are mapped by hand in queries.rs instead of deriving FromRow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub budget_id: Option<i64>,
}

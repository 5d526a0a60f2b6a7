use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub budget_id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub category_id: i64,
    pub allocated_amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

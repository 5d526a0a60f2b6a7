use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::database::models::{CategoryType, SavingsGoal};

/*
Read-only aggregation over rows the query layer already narrowed to the acting
user and the requested filters. Everything is exact Decimal arithmetic; a sum
over an empty set is 0, never an error.
 */

// One transaction joined with its category's type. "Transaction type" always
// means the linked category's type; transactions carry no type of their own.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub category_type: CategoryType,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/*==========Total income/expense===========*/

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeExpenseTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

pub fn income_expense_totals(entries: &[ReportEntry]) -> IncomeExpenseTotals {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for entry in entries {
        match entry.category_type {
            CategoryType::Income => total_income += entry.amount,
            CategoryType::Expense => total_expense += entry.amount,
        }
    }
    IncomeExpenseTotals {
        total_income,
        total_expense,
    }
}

/*==========Trends===========*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Month,
    Week,
}

impl Timeframe {
    // Anything other than "week" falls back to the default monthly view.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some(v) if v.eq_ignore_ascii_case("week") => Self::Week,
            _ => Self::Month,
        }
    }
}

// First calendar day of the month, or the Monday of the week.
pub fn bucket_start(date: NaiveDate, timeframe: Timeframe) -> NaiveDate {
    match timeframe {
        Timeframe::Month => date.with_day(1).unwrap_or(date),
        Timeframe::Week => {
            date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendRow {
    pub period: NaiveDate,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
}

// One row per bucket containing at least one transaction, ascending by bucket
// start; a side with no entries reports 0.
pub fn income_expense_trends(entries: &[ReportEntry], timeframe: Timeframe) -> Vec<TrendRow> {
    let mut buckets: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for entry in entries {
        let bucket = buckets
            .entry(bucket_start(entry.date, timeframe))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match entry.category_type {
            CategoryType::Income => bucket.0 += entry.amount,
            CategoryType::Expense => bucket.1 += entry.amount,
        }
    }
    buckets
        .into_iter()
        .map(|(period, (total_income, total_expenses))| TrendRow {
            period,
            total_income,
            total_expenses,
        })
        .collect()
}

/*==========Net worth===========*/

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetWorthReport {
    pub net_worth: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_savings: Decimal,
}

// Savings are summed across all of the user's goals regardless of any date
// filter; only the income/expense side honors the filtered window.
pub fn net_worth(entries: &[ReportEntry], goals: &[SavingsGoal]) -> NetWorthReport {
    let totals = income_expense_totals(entries);
    let total_savings: Decimal = goals.iter().map(|g| g.current_amount).sum();
    NetWorthReport {
        net_worth: totals.total_income - totals.total_expense + total_savings,
        total_income: totals.total_income,
        total_expense: totals.total_expense,
        total_savings,
    }
}

/*==========Budget alerts===========*/

// A budget joined with its category's name, for the alert message.
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub budget_id: i64,
    pub category_name: String,
    pub allocated_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetAlert {
    pub message: String,
    pub is_high_priority: bool,
}

// Collapses (budget_id, amount) rows into per-budget sums. Only transactions
// explicitly linked via budget_id ever reach this point.
pub fn sum_by_budget(linked: &[(i64, Decimal)]) -> HashMap<i64, Decimal> {
    let mut sums: HashMap<i64, Decimal> = HashMap::new();
    for (budget_id, amount) in linked {
        *sums.entry(*budget_id).or_insert(Decimal::ZERO) += *amount;
    }
    sums
}

// Strictly exceeding the allocation fires an alert; spending exactly the
// allocation does not. Computed on demand, nothing is persisted.
pub fn budget_alerts(
    budgets: &[BudgetStatus],
    spent: &HashMap<i64, Decimal>,
) -> Vec<BudgetAlert> {
    let mut alerts = Vec::new();
    for budget in budgets {
        let total = spent
            .get(&budget.budget_id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        if total > budget.allocated_amount {
            alerts.push(BudgetAlert {
                message: format!(
                    "Your total expenses for the {} category have exceeded your allocated budget of {}.",
                    budget.category_name, budget.allocated_amount
                ),
                is_high_priority: true,
            });
        }
    }
    alerts
}

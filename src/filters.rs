use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::models::CategoryType;

/*
Raw query parameters come in as strings and are parsed leniently: a date that
does not parse, or a category type outside {income, expense}, is treated as if
the filter had not been supplied at all. Owner scoping is never a filter -- the
query layer applies it unconditionally.
 */

// Accepts 2025-06-01 and 2025/06/01; anything else is ignored.
pub fn parse_date_param(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .ok()
}

fn parse_type_param(s: &str) -> Option<CategoryType> {
    CategoryType::parse(s)
}

/*==========Transactions===========*/

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionQuery {
    pub category: Option<i64>,
    pub category_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// Parsed form consumed by the query layer. For transaction listings each date
// bound applies independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    pub category_id: Option<i64>,
    pub category_type: Option<CategoryType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TransactionQuery {
    pub fn parsed(&self) -> TransactionFilter {
        TransactionFilter {
            category_id: self.category,
            category_type: self.category_type.as_deref().and_then(parse_type_param),
            start_date: self.start_date.as_deref().and_then(parse_date_param),
            end_date: self.end_date.as_deref().and_then(parse_date_param),
        }
    }
}

/*==========Budgets===========*/

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetFilter {
    // Inclusive containment: the budget's own start and end must both fall
    // inside the window. Applied only when both bounds are usable.
    pub window: Option<(NaiveDate, NaiveDate)>,
    pub category_type: Option<CategoryType>,
}

impl BudgetQuery {
    pub fn parsed(&self) -> BudgetFilter {
        let start = self.start_date.as_deref().and_then(parse_date_param);
        let end = self.end_date.as_deref().and_then(parse_date_param);
        BudgetFilter {
            window: start.zip(end),
            category_type: self.category_type.as_deref().and_then(parse_type_param),
        }
    }
}

/*==========Categories===========*/

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryQuery {
    pub category_type: Option<String>,
}

impl CategoryQuery {
    pub fn parsed(&self) -> Option<CategoryType> {
        self.category_type.as_deref().and_then(parse_type_param)
    }
}

/*==========Reports===========*/

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category_type: Option<String>,
    pub timeframe: Option<String>,
}

impl ReportQuery {
    // Report windows apply only when both bounds parse, unlike the
    // transaction listing where each bound stands on its own.
    pub fn parsed(&self) -> TransactionFilter {
        let start = self.start_date.as_deref().and_then(parse_date_param);
        let end = self.end_date.as_deref().and_then(parse_date_param);
        let (start_date, end_date) = match start.zip(end) {
            Some((s, e)) => (Some(s), Some(e)),
            None => (None, None),
        };
        TransactionFilter {
            category_id: None,
            category_type: self.category_type.as_deref().and_then(parse_type_param),
            start_date,
            end_date,
        }
    }

    pub fn timeframe(&self) -> crate::reports::Timeframe {
        crate::reports::Timeframe::parse(self.timeframe.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_dates_are_ignored_not_rejected() {
        let query = TransactionQuery {
            start_date: Some("junk".to_string()),
            end_date: Some("2025-06-30".to_string()),
            ..Default::default()
        };
        let filter = query.parsed();
        assert_eq!(filter.start_date, None);
        assert_eq!(
            filter.end_date,
            Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
        );
    }

    #[test]
    fn slash_dates_are_accepted() {
        assert_eq!(
            parse_date_param("2025/06/01"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
    }

    #[test]
    fn category_type_is_case_insensitive_and_lenient() {
        let query = TransactionQuery {
            category_type: Some("Income".to_string()),
            ..Default::default()
        };
        assert_eq!(query.parsed().category_type, Some(CategoryType::Income));

        let query = TransactionQuery {
            category_type: Some("transfer".to_string()),
            ..Default::default()
        };
        assert_eq!(query.parsed().category_type, None);
    }

    #[test]
    fn budget_window_needs_both_bounds() {
        let query = BudgetQuery {
            start_date: Some("2025-06-01".to_string()),
            end_date: None,
            category_type: None,
        };
        assert_eq!(query.parsed().window, None);

        let query = BudgetQuery {
            start_date: Some("2025-06-01".to_string()),
            end_date: Some("2025-06-30".to_string()),
            category_type: None,
        };
        assert!(query.parsed().window.is_some());
    }

    #[test]
    fn report_window_needs_both_bounds() {
        let query = ReportQuery {
            start_date: Some("2025-06-01".to_string()),
            ..Default::default()
        };
        let filter = query.parsed();
        assert_eq!(filter.start_date, None);
        assert_eq!(filter.end_date, None);
    }
}

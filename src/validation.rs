use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::database::models::{Budget, Category, CategoryType};
use crate::error::FieldErrors;

/*
All-or-nothing validation: each entity has one typed validator that takes the
candidate record plus whatever related rows the caller already fetched, and
returns either a normalized record ready to persist or the full set of
field-level errors. Nothing here touches the database.
 */

fn push_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

/*==========User registration===========*/

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

// Normalized registration, password still in the clear; the caller hashes it
// before anything is persisted.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub fn validate_registration(
    draft: &RegistrationDraft,
    username_taken: bool,
    email_taken: bool,
) -> Result<ValidRegistration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = draft.username.trim();
    if username.is_empty() {
        push_error(&mut errors, "username", "Username cannot be empty.");
    } else if username.chars().any(char::is_whitespace) {
        push_error(&mut errors, "username", "Username cannot contain spaces.");
    } else if !username.chars().all(char::is_alphanumeric) {
        push_error(&mut errors, "username", "Username must be alphanumeric.");
    } else if username_taken {
        push_error(
            &mut errors,
            "username",
            "A user with this username already exists.",
        );
    }

    let email = draft.email.trim().to_lowercase();
    if !email.contains('@') {
        push_error(&mut errors, "email", "Enter a valid email address.");
    } else if email_taken {
        push_error(
            &mut errors,
            "email",
            "A user with this email already exists.",
        );
    }

    if draft.password.len() < 8 {
        push_error(
            &mut errors,
            "password",
            "Password must be at least 8 characters long.",
        );
    } else {
        if !draft.password.chars().any(|c| c.is_ascii_digit()) {
            push_error(
                &mut errors,
                "password",
                "Password must contain at least one number.",
            );
        }
        if !draft.password.chars().any(char::is_alphabetic) {
            push_error(
                &mut errors,
                "password",
                "Password must contain at least one letter.",
            );
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidRegistration {
        username: username.to_string(),
        email,
        password: draft.password.clone(),
        first_name: draft.first_name.as_deref().map(|s| s.trim().to_string()),
        last_name: draft.last_name.as_deref().map(|s| s.trim().to_string()),
    })
}

/*==========Category===========*/

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDraft {
    pub category_name: String,
    pub category_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    pub category_name: Option<String>,
    pub category_type: Option<String>,
}

impl CategoryPatch {
    pub fn apply(self, existing: &Category) -> CategoryDraft {
        CategoryDraft {
            category_name: self
                .category_name
                .unwrap_or_else(|| existing.category_name.clone()),
            category_type: self
                .category_type
                .unwrap_or_else(|| existing.category_type.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidCategory {
    pub category_name: String,
    pub category_type: CategoryType,
}

// siblings: every category owned by the acting user. exclude skips the record
// itself when validating an update.
pub fn validate_category(
    draft: &CategoryDraft,
    siblings: &[Category],
    exclude: Option<i64>,
) -> Result<ValidCategory, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = draft.category_name.trim();
    if name.is_empty() {
        push_error(&mut errors, "category_name", "Category name cannot be empty.");
    } else {
        let duplicate = siblings.iter().any(|c| {
            Some(c.category_id) != exclude
                && c.category_name.eq_ignore_ascii_case(name)
        });
        if duplicate {
            push_error(
                &mut errors,
                "category_name",
                "You already have a category with this name.",
            );
        }
    }

    let category_type = match CategoryType::parse(&draft.category_type) {
        Some(t) => Some(t),
        None => {
            push_error(
                &mut errors,
                "category_type",
                "Category type must be either 'income' or 'expense'.",
            );
            None
        }
    };

    match (errors.is_empty(), category_type) {
        (true, Some(category_type)) => Ok(ValidCategory {
            category_name: name.to_string(),
            category_type,
        }),
        _ => Err(errors),
    }
}

/*==========Transaction===========*/

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDraft {
    pub category_id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub budget_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPatch {
    pub category_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub budget_id: Option<Option<i64>>,
}

impl TransactionPatch {
    pub fn apply(self, existing: &crate::database::models::Transaction) -> TransactionDraft {
        TransactionDraft {
            category_id: self.category_id.unwrap_or(existing.category_id),
            amount: self.amount.unwrap_or(existing.amount),
            date: self.date.unwrap_or(existing.date),
            description: self
                .description
                .unwrap_or_else(|| existing.description.clone()),
            budget_id: self.budget_id.unwrap_or(existing.budget_id),
        }
    }
}

// Related rows the caller looked up for the ids named in the draft. None means
// the id resolved to nothing at all.
#[derive(Debug, Default)]
pub struct TransactionRefs<'a> {
    pub category: Option<&'a Category>,
    pub budget: Option<&'a Budget>,
}

#[derive(Debug, Clone)]
pub struct ValidTransaction {
    pub category_id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub budget_id: Option<i64>,
}

pub fn validate_transaction(
    draft: &TransactionDraft,
    user_id: i64,
    today: NaiveDate,
    refs: TransactionRefs<'_>,
) -> Result<ValidTransaction, FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.amount <= Decimal::ZERO {
        push_error(
            &mut errors,
            "amount",
            "Transaction amount must be greater than zero.",
        );
    }

    if draft.date > today {
        push_error(&mut errors, "date", "Transaction date cannot be in the future.");
    }

    let category = match refs.category {
        None => {
            push_error(&mut errors, "category_id", "Category does not exist.");
            None
        }
        Some(c) if c.user_id != user_id => {
            push_error(&mut errors, "category_id", "You do not own this category.");
            None
        }
        Some(c) => Some(c),
    };

    let description = draft.description.trim();
    if description.is_empty() {
        push_error(&mut errors, "description", "Description cannot be empty.");
    }

    // A budget link must resolve to a budget the user owns. It only sticks on
    // expense transactions; on income it is dropped.
    let mut budget_id = None;
    if let Some(requested) = draft.budget_id {
        match refs.budget {
            Some(b) if b.user_id == user_id => budget_id = Some(requested),
            _ => push_error(&mut errors, "budget_id", "Invalid budget selected"),
        }
    }
    if let Some(c) = category {
        if c.category_type != CategoryType::Expense {
            budget_id = None;
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidTransaction {
        category_id: draft.category_id,
        amount: draft.amount.round_dp(2),
        date: draft.date,
        description: description.to_string(),
        budget_id,
    })
}

/*==========Budget===========*/

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetDraft {
    pub category_id: i64,
    pub allocated_amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetPatch {
    pub category_id: Option<i64>,
    pub allocated_amount: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BudgetPatch {
    pub fn apply(self, existing: &Budget) -> BudgetDraft {
        BudgetDraft {
            category_id: self.category_id.unwrap_or(existing.category_id),
            allocated_amount: self.allocated_amount.unwrap_or(existing.allocated_amount),
            start_date: self.start_date.unwrap_or(existing.start_date),
            end_date: self.end_date.unwrap_or(existing.end_date),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidBudget {
    pub category_id: i64,
    pub allocated_amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub fn validate_budget(
    draft: &BudgetDraft,
    user_id: i64,
    today: NaiveDate,
    category: Option<&Category>,
    is_update: bool,
) -> Result<ValidBudget, FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.allocated_amount <= Decimal::ZERO {
        push_error(
            &mut errors,
            "allocated_amount",
            "Allocated amount must be greater than zero.",
        );
    }

    // Creation only; an existing budget may keep a start date that has passed.
    if !is_update && draft.start_date < today {
        push_error(&mut errors, "start_date", "Start date cannot be in the past.");
    }

    if draft.end_date <= draft.start_date {
        push_error(
            &mut errors,
            "end_date",
            "End date must be after the start date.",
        );
    }

    match category {
        None => push_error(&mut errors, "category_id", "Category does not exist."),
        Some(c) if c.user_id != user_id => {
            push_error(&mut errors, "category_id", "You do not own this category.")
        }
        Some(_) => {}
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidBudget {
        category_id: draft.category_id,
        allocated_amount: draft.allocated_amount.round_dp(2),
        start_date: draft.start_date,
        end_date: draft.end_date,
    })
}

/*==========Savings goal===========*/

#[derive(Debug, Clone, Deserialize)]
pub struct SavingsGoalDraft {
    pub goal_name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavingsGoalPatch {
    pub goal_name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
}

impl SavingsGoalPatch {
    // Fields missing from a partial update fall back to the stored values, so
    // the cross-field comparison always sees a complete candidate.
    pub fn apply(self, existing: &crate::database::models::SavingsGoal) -> SavingsGoalDraft {
        SavingsGoalDraft {
            goal_name: self.goal_name.unwrap_or_else(|| existing.goal_name.clone()),
            target_amount: self.target_amount.unwrap_or(existing.target_amount),
            current_amount: self.current_amount.unwrap_or(existing.current_amount),
            deadline: self.deadline.unwrap_or(existing.deadline),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidSavingsGoal {
    pub goal_name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
}

// check_deadline is false when a partial update left the deadline untouched;
// a goal past its deadline can still have its amounts adjusted.
pub fn validate_savings_goal(
    draft: &SavingsGoalDraft,
    today: NaiveDate,
    check_deadline: bool,
) -> Result<ValidSavingsGoal, FieldErrors> {
    let mut errors = FieldErrors::new();

    let goal_name = draft.goal_name.trim();
    if goal_name.is_empty() {
        push_error(&mut errors, "goal_name", "Goal name cannot be empty.");
    }

    if draft.target_amount <= Decimal::ZERO {
        push_error(
            &mut errors,
            "target_amount",
            "Target amount must be greater than zero.",
        );
    }

    if draft.current_amount < Decimal::ZERO {
        push_error(
            &mut errors,
            "current_amount",
            "Current amount cannot be negative.",
        );
    } else if draft.current_amount.round_dp(2) > draft.target_amount.round_dp(2) {
        push_error(
            &mut errors,
            "current_amount",
            "Current amount cannot exceed the target amount.",
        );
    }

    if check_deadline && draft.deadline <= today {
        push_error(&mut errors, "deadline", "Deadline must be a future date.");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidSavingsGoal {
        goal_name: goal_name.to_string(),
        target_amount: draft.target_amount.round_dp(2),
        current_amount: draft.current_amount.round_dp(2),
        deadline: draft.deadline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn category(id: i64, user_id: i64, name: &str, category_type: CategoryType) -> Category {
        Category {
            category_id: id,
            user_id,
            category_name: name.to_string(),
            category_type,
        }
    }

    fn budget(id: i64, user_id: i64) -> Budget {
        Budget {
            budget_id: id,
            user_id,
            category_id: 1,
            allocated_amount: dec("200.00"),
            start_date: date("2025-01-01"),
            end_date: date("2025-02-01"),
        }
    }

    const TODAY: &str = "2025-06-15";

    /*==========registration===========*/

    fn registration(username: &str, email: &str, password: &str) -> RegistrationDraft {
        RegistrationDraft {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn registration_accepts_and_normalizes() {
        let draft = registration("alice1", "  Alice@Example.COM ", "passw0rd");
        let valid = validate_registration(&draft, false, false).unwrap();
        assert_eq!(valid.username, "alice1");
        assert_eq!(valid.email, "alice@example.com");
    }

    #[test]
    fn registration_rejects_bad_usernames() {
        for username in ["", "has space", "semi;colon"] {
            let draft = registration(username, "a@b.com", "passw0rd");
            let errors = validate_registration(&draft, false, false).unwrap_err();
            assert!(errors.contains_key("username"), "{username:?} accepted");
        }
    }

    #[test]
    fn registration_rejects_weak_passwords() {
        // too short / no digit / no letter
        for password in ["sh0rt", "lettersonly", "1234567890"] {
            let draft = registration("bob", "b@c.com", password);
            let errors = validate_registration(&draft, false, false).unwrap_err();
            assert!(errors.contains_key("password"), "{password:?} accepted");
        }
    }

    #[test]
    fn registration_rejects_taken_email() {
        let draft = registration("carol", "c@d.com", "passw0rd");
        let errors = validate_registration(&draft, false, true).unwrap_err();
        assert_eq!(
            errors["email"],
            vec!["A user with this email already exists."]
        );
    }

    /*==========category===========*/

    #[test]
    fn category_trims_and_lowercases_type() {
        let draft = CategoryDraft {
            category_name: "  Salary  ".to_string(),
            category_type: "Income".to_string(),
        };
        let valid = validate_category(&draft, &[], None).unwrap();
        assert_eq!(valid.category_name, "Salary");
        assert_eq!(valid.category_type, CategoryType::Income);
    }

    #[test]
    fn category_duplicate_is_case_insensitive() {
        let siblings = vec![category(1, 7, "Salary", CategoryType::Income)];
        let draft = CategoryDraft {
            category_name: "salary".to_string(),
            category_type: "income".to_string(),
        };
        let errors = validate_category(&draft, &siblings, None).unwrap_err();
        assert_eq!(
            errors["category_name"],
            vec!["You already have a category with this name."]
        );

        // updating the record itself is not a duplicate of itself
        assert!(validate_category(&draft, &siblings, Some(1)).is_ok());
    }

    #[test]
    fn category_rejects_unknown_type() {
        let draft = CategoryDraft {
            category_name: "Rent".to_string(),
            category_type: "transfer".to_string(),
        };
        let errors = validate_category(&draft, &[], None).unwrap_err();
        assert!(errors.contains_key("category_type"));
    }

    /*==========transaction===========*/

    fn txn_draft(amount: &str, day: &str) -> TransactionDraft {
        TransactionDraft {
            category_id: 1,
            amount: dec(amount),
            date: date(day),
            description: "Paycheck".to_string(),
            budget_id: None,
        }
    }

    #[test]
    fn transaction_rounds_amount_to_two_places() {
        let cat = category(1, 7, "Salary", CategoryType::Income);
        let draft = txn_draft("100.005", "2025-06-01");
        let refs = TransactionRefs { category: Some(&cat), budget: None };
        let valid = validate_transaction(&draft, 7, date(TODAY), refs).unwrap();
        // banker's rounding, same as the 2dp storage format
        assert_eq!(valid.amount, dec("100.00"));
        assert!(valid.amount > Decimal::ZERO);
    }

    #[test]
    fn transaction_rejects_non_positive_amount() {
        let cat = category(1, 7, "Salary", CategoryType::Income);
        for amount in ["0", "-100.00"] {
            let draft = txn_draft(amount, "2025-06-01");
            let refs = TransactionRefs { category: Some(&cat), budget: None };
            let errors = validate_transaction(&draft, 7, date(TODAY), refs).unwrap_err();
            assert_eq!(
                errors["amount"],
                vec!["Transaction amount must be greater than zero."]
            );
        }
    }

    #[test]
    fn transaction_rejects_future_date() {
        let cat = category(1, 7, "Salary", CategoryType::Income);
        let draft = txn_draft("10.00", "2025-06-16");
        let refs = TransactionRefs { category: Some(&cat), budget: None };
        let errors = validate_transaction(&draft, 7, date(TODAY), refs).unwrap_err();
        assert!(errors.contains_key("date"));

        // today itself is fine
        let draft = txn_draft("10.00", TODAY);
        let refs = TransactionRefs { category: Some(&cat), budget: None };
        assert!(validate_transaction(&draft, 7, date(TODAY), refs).is_ok());
    }

    #[test]
    fn transaction_rejects_foreign_category() {
        let other_users_cat = category(1, 99, "Salary", CategoryType::Income);
        let draft = txn_draft("10.00", "2025-06-01");
        let refs = TransactionRefs { category: Some(&other_users_cat), budget: None };
        let errors = validate_transaction(&draft, 7, date(TODAY), refs).unwrap_err();
        assert_eq!(errors["category_id"], vec!["You do not own this category."]);
    }

    #[test]
    fn transaction_rejects_blank_description() {
        let cat = category(1, 7, "Salary", CategoryType::Income);
        let mut draft = txn_draft("10.00", "2025-06-01");
        draft.description = "   ".to_string();
        let refs = TransactionRefs { category: Some(&cat), budget: None };
        let errors = validate_transaction(&draft, 7, date(TODAY), refs).unwrap_err();
        assert_eq!(errors["description"], vec!["Description cannot be empty."]);
    }

    #[test]
    fn transaction_budget_link_needs_owned_budget() {
        let cat = category(1, 7, "Groceries", CategoryType::Expense);
        let foreign = budget(3, 99);
        let mut draft = txn_draft("10.00", "2025-06-01");
        draft.budget_id = Some(3);

        let refs = TransactionRefs { category: Some(&cat), budget: Some(&foreign) };
        let errors = validate_transaction(&draft, 7, date(TODAY), refs).unwrap_err();
        assert_eq!(errors["budget_id"], vec!["Invalid budget selected"]);

        let owned = budget(3, 7);
        let refs = TransactionRefs { category: Some(&cat), budget: Some(&owned) };
        let valid = validate_transaction(&draft, 7, date(TODAY), refs).unwrap();
        assert_eq!(valid.budget_id, Some(3));
    }

    #[test]
    fn transaction_budget_link_dropped_on_income() {
        let cat = category(1, 7, "Salary", CategoryType::Income);
        let owned = budget(3, 7);
        let mut draft = txn_draft("10.00", "2025-06-01");
        draft.budget_id = Some(3);
        let refs = TransactionRefs { category: Some(&cat), budget: Some(&owned) };
        let valid = validate_transaction(&draft, 7, date(TODAY), refs).unwrap();
        assert_eq!(valid.budget_id, None);
    }

    /*==========budget===========*/

    fn budget_draft(start: &str, end: &str) -> BudgetDraft {
        BudgetDraft {
            category_id: 1,
            allocated_amount: dec("200.00"),
            start_date: date(start),
            end_date: date(end),
        }
    }

    #[test]
    fn budget_end_date_must_follow_start_date() {
        let cat = category(1, 7, "Groceries", CategoryType::Expense);
        for (start, end) in [("2025-07-01", "2025-07-01"), ("2025-07-01", "2025-06-30")] {
            let draft = budget_draft(start, end);
            let errors =
                validate_budget(&draft, 7, date(TODAY), Some(&cat), false).unwrap_err();
            assert_eq!(
                errors["end_date"],
                vec!["End date must be after the start date."]
            );
        }
    }

    #[test]
    fn budget_start_date_check_is_create_only() {
        let cat = category(1, 7, "Groceries", CategoryType::Expense);
        let draft = budget_draft("2025-01-01", "2025-12-31");

        let errors = validate_budget(&draft, 7, date(TODAY), Some(&cat), false).unwrap_err();
        assert_eq!(errors["start_date"], vec!["Start date cannot be in the past."]);

        // the same dates pass on update
        assert!(validate_budget(&draft, 7, date(TODAY), Some(&cat), true).is_ok());
    }

    #[test]
    fn budget_rejects_non_positive_allocation() {
        let cat = category(1, 7, "Groceries", CategoryType::Expense);
        let mut draft = budget_draft("2025-07-01", "2025-08-01");
        draft.allocated_amount = Decimal::ZERO;
        let errors = validate_budget(&draft, 7, date(TODAY), Some(&cat), false).unwrap_err();
        assert!(errors.contains_key("allocated_amount"));
    }

    #[test]
    fn budget_rejects_foreign_category() {
        let foreign = category(1, 99, "Groceries", CategoryType::Expense);
        let draft = budget_draft("2025-07-01", "2025-08-01");
        let errors =
            validate_budget(&draft, 7, date(TODAY), Some(&foreign), false).unwrap_err();
        assert_eq!(errors["category_id"], vec!["You do not own this category."]);
    }

    /*==========savings goal===========*/

    fn goal_draft(target: &str, current: &str, deadline: &str) -> SavingsGoalDraft {
        SavingsGoalDraft {
            goal_name: "Emergency Fund".to_string(),
            target_amount: dec(target),
            current_amount: dec(current),
            deadline: date(deadline),
        }
    }

    #[test]
    fn goal_amounts_bounded_and_rounded() {
        let valid =
            validate_savings_goal(&goal_draft("1000.005", "200.004", "2026-01-01"), date(TODAY), true)
                .unwrap();
        assert_eq!(valid.target_amount, dec("1000.00"));
        assert_eq!(valid.current_amount, dec("200.00"));
    }

    #[test]
    fn goal_current_cannot_exceed_target() {
        let errors =
            validate_savings_goal(&goal_draft("100.00", "150.00", "2026-01-01"), date(TODAY), true)
                .unwrap_err();
        assert_eq!(
            errors["current_amount"],
            vec!["Current amount cannot exceed the target amount."]
        );

        // equality is allowed
        assert!(validate_savings_goal(
            &goal_draft("100.00", "100.00", "2026-01-01"),
            date(TODAY),
            true
        )
        .is_ok());
    }

    #[test]
    fn goal_current_cannot_be_negative() {
        let errors =
            validate_savings_goal(&goal_draft("100.00", "-1.00", "2026-01-01"), date(TODAY), true)
                .unwrap_err();
        assert_eq!(errors["current_amount"], vec!["Current amount cannot be negative."]);
    }

    #[test]
    fn goal_deadline_must_be_future_unless_untouched() {
        let draft = goal_draft("100.00", "50.00", TODAY);
        let errors = validate_savings_goal(&draft, date(TODAY), true).unwrap_err();
        assert_eq!(errors["deadline"], vec!["Deadline must be a future date."]);

        // partial update that left the deadline alone still goes through
        assert!(validate_savings_goal(&draft, date(TODAY), false).is_ok());
    }

    #[test]
    fn goal_patch_falls_back_to_stored_values() {
        let existing = crate::database::models::SavingsGoal {
            goal_id: 1,
            user_id: 7,
            goal_name: "Laptop".to_string(),
            target_amount: dec("100.00"),
            current_amount: dec("20.00"),
            deadline: date("2026-01-01"),
        };
        // raising current above the stored target must fail even though the
        // patch itself never mentions target_amount
        let patch = SavingsGoalPatch {
            current_amount: Some(dec("150.00")),
            ..Default::default()
        };
        let merged = patch.apply(&existing);
        let errors = validate_savings_goal(&merged, date(TODAY), false).unwrap_err();
        assert!(errors.contains_key("current_amount"));
    }
}

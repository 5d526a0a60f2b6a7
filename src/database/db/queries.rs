use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, QueryBuilder, Row, Sqlite};

use crate::database::models::{
    AuthToken, Budget, Category, CategoryType, SavingsGoal, Transaction, User,
};
use crate::filters::{BudgetFilter, TransactionFilter};
use crate::reports::{BudgetStatus, ReportEntry};
use crate::validation::{
    ValidBudget, ValidCategory, ValidSavingsGoal, ValidTransaction,
};

/*
This file contains the SQL query CRUD (Create, Read, Update, Delete) logic and
is responsible for interacting with the database. Every read and write on user
data is owner-scoped: the acting user's id is always part of the WHERE clause.

Monetary columns are TEXT; they are written with Decimal::to_string and read
back through Decimal::from_str so sums never go through binary floats.
 */

fn decode_decimal(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let text: String = row.try_get(column)?;
    Decimal::from_str(&text)
        .map_err(|e| sqlx::Error::Decode(format!("invalid decimal for {column}: {e}").into()))
}

/*==========User queries===========*/

pub async fn create_user(
    pool: &Pool<Sqlite>,
    username: &str,
    email: &str,
    password_hash: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let user_id = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, first_name, last_name)
        VALUES (?, ?, ?, ?, ?)
        RETURNING user_id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await?
    .try_get("user_id")?;

    Ok(user_id)
}

pub async fn get_user_by_id(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_user_by_username(
    pool: &Pool<Sqlite>,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn username_exists(pool: &Pool<Sqlite>, username: &str) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

// email is normalized (trimmed, lowercased) before it gets here
pub async fn email_exists(pool: &Pool<Sqlite>, email: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/*==========Auth token queries===========*/

pub async fn create_auth_token(
    pool: &Pool<Sqlite>,
    user_id: i64,
    access_token: &str,
    refresh_token: &str,
    access_expires_at: NaiveDateTime,
    refresh_expires_at: NaiveDateTime,
) -> Result<i64, sqlx::Error> {
    let token_id = sqlx::query(
        r#"
        INSERT INTO auth_tokens
        (user_id, access_token, refresh_token, access_expires_at, refresh_expires_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING token_id
        "#,
    )
    .bind(user_id)
    .bind(access_token)
    .bind(refresh_token)
    .bind(access_expires_at)
    .bind(refresh_expires_at)
    .fetch_one(pool)
    .await?
    .try_get("token_id")?;

    Ok(token_id)
}

pub async fn get_token_by_access(
    pool: &Pool<Sqlite>,
    access_token: &str,
) -> Result<Option<AuthToken>, sqlx::Error> {
    sqlx::query_as::<_, AuthToken>("SELECT * FROM auth_tokens WHERE access_token = ?")
        .bind(access_token)
        .fetch_optional(pool)
        .await
}

pub async fn get_token_by_refresh(
    pool: &Pool<Sqlite>,
    refresh_token: &str,
) -> Result<Option<AuthToken>, sqlx::Error> {
    sqlx::query_as::<_, AuthToken>("SELECT * FROM auth_tokens WHERE refresh_token = ?")
        .bind(refresh_token)
        .fetch_optional(pool)
        .await
}

// refresh keeps the row and swaps the access token in place
pub async fn rotate_access_token(
    pool: &Pool<Sqlite>,
    token_id: i64,
    access_token: &str,
    access_expires_at: NaiveDateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE auth_tokens
        SET access_token = ?, access_expires_at = ?
        WHERE token_id = ?
        "#,
    )
    .bind(access_token)
    .bind(access_expires_at)
    .bind(token_id)
    .execute(pool)
    .await?;

    Ok(())
}

/*==========Category queries===========*/

pub async fn create_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category: &ValidCategory,
) -> Result<i64, sqlx::Error> {
    let category_id = sqlx::query(
        r#"
        INSERT INTO categories (user_id, category_name, category_type)
        VALUES (?, ?, ?)
        RETURNING category_id
        "#,
    )
    .bind(user_id)
    .bind(&category.category_name)
    .bind(category.category_type.as_str())
    .fetch_one(pool)
    .await?
    .try_get("category_id")?;

    Ok(category_id)
}

pub async fn get_categories_for_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category_type: Option<CategoryType>,
) -> Result<Vec<Category>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT * FROM categories WHERE user_id = ",
    );
    qb.push_bind(user_id);
    if let Some(t) = category_type {
        qb.push(" AND category_type = ").push_bind(t.as_str());
    }
    qb.push(" ORDER BY category_name ASC");

    qb.build_query_as::<Category>().fetch_all(pool).await
}

pub async fn get_category_owned(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE category_id = ? AND user_id = ?",
    )
    .bind(category_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

// Unscoped lookup, used only to tell "does not exist" apart from "not yours"
// when validating a reference; never exposed through a read endpoint.
pub async fn get_category_any(
    pool: &Pool<Sqlite>,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE category_id = ?")
        .bind(category_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category_id: i64,
    category: &ValidCategory,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE categories
        SET category_name = ?, category_type = ?
        WHERE category_id = ? AND user_id = ?
        "#,
    )
    .bind(&category.category_name)
    .bind(category.category_type.as_str())
    .bind(category_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_transactions_for_category(
    pool: &Pool<Sqlite>,
    category_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE category_id = ?")
        .bind(category_id)
        .fetch_one(pool)
        .await
}

/* Deleting a category takes its budgets with it; transactions that pointed at
those budgets keep existing with the link cleared. The caller has already
refused the delete if any transaction references the category itself. */
pub async fn delete_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category_id: i64,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE transactions
        SET budget_id = NULL
        WHERE budget_id IN (SELECT budget_id FROM budgets WHERE category_id = ? AND user_id = ?)
        "#,
    )
    .bind(category_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM budgets WHERE category_id = ? AND user_id = ?")
        .bind(category_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM categories WHERE category_id = ? AND user_id = ?")
        .bind(category_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/*==========Transaction queries===========*/

fn map_transaction(row: &SqliteRow) -> Result<Transaction, sqlx::Error> {
    Ok(Transaction {
        transaction_id: row.try_get("transaction_id")?,
        user_id: row.try_get("user_id")?,
        category_id: row.try_get("category_id")?,
        amount: decode_decimal(row, "amount")?,
        date: row.try_get("date")?,
        description: row.try_get("description")?,
        budget_id: row.try_get("budget_id")?,
    })
}

fn push_transaction_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &TransactionFilter) {
    if let Some(category_id) = filter.category_id {
        qb.push(" AND t.category_id = ").push_bind(category_id);
    }
    if let Some(t) = filter.category_type {
        qb.push(" AND c.category_type = ").push_bind(t.as_str());
    }
    if let Some(start) = filter.start_date {
        qb.push(" AND t.date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND t.date <= ").push_bind(end);
    }
}

pub async fn create_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    t: &ValidTransaction,
) -> Result<i64, sqlx::Error> {
    let amount_str = t.amount.to_string();

    let transaction_id = sqlx::query(
        r#"
        INSERT INTO transactions (user_id, category_id, amount, date, description, budget_id)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING transaction_id
        "#,
    )
    .bind(user_id)
    .bind(t.category_id)
    .bind(amount_str)
    .bind(t.date)
    .bind(&t.description)
    .bind(t.budget_id)
    .fetch_one(pool)
    .await?
    .try_get("transaction_id")?;

    Ok(transaction_id)
}

pub async fn list_transactions(
    pool: &Pool<Sqlite>,
    user_id: i64,
    filter: &TransactionFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Transaction>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT t.transaction_id, t.user_id, t.category_id, t.amount, t.date, t.description, t.budget_id \
         FROM transactions t \
         JOIN categories c ON c.category_id = t.category_id \
         WHERE t.user_id = ",
    );
    qb.push_bind(user_id);
    push_transaction_filters(&mut qb, filter);
    qb.push(" ORDER BY t.date DESC, t.transaction_id DESC");
    qb.push(" LIMIT ").push_bind(limit);
    qb.push(" OFFSET ").push_bind(offset);

    qb.build()
        .fetch_all(pool)
        .await?
        .iter()
        .map(map_transaction)
        .collect()
}

pub async fn count_transactions(
    pool: &Pool<Sqlite>,
    user_id: i64,
    filter: &TransactionFilter,
) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT COUNT(*) FROM transactions t \
         JOIN categories c ON c.category_id = t.category_id \
         WHERE t.user_id = ",
    );
    qb.push_bind(user_id);
    push_transaction_filters(&mut qb, filter);

    qb.build_query_scalar::<i64>().fetch_one(pool).await
}

pub async fn get_transaction_owned(
    pool: &Pool<Sqlite>,
    user_id: i64,
    transaction_id: i64,
) -> Result<Option<Transaction>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT * FROM transactions WHERE transaction_id = ? AND user_id = ?",
    )
    .bind(transaction_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(map_transaction).transpose()
}

pub async fn update_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    transaction_id: i64,
    t: &ValidTransaction,
) -> Result<bool, sqlx::Error> {
    let amount_str = t.amount.to_string();

    let result = sqlx::query(
        r#"
        UPDATE transactions
        SET category_id = ?, amount = ?, date = ?, description = ?, budget_id = ?
        WHERE transaction_id = ? AND user_id = ?
        "#,
    )
    .bind(t.category_id)
    .bind(amount_str)
    .bind(t.date)
    .bind(&t.description)
    .bind(t.budget_id)
    .bind(transaction_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    transaction_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM transactions WHERE transaction_id = ? AND user_id = ?",
    )
    .bind(transaction_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Budget queries===========*/

fn map_budget(row: &SqliteRow) -> Result<Budget, sqlx::Error> {
    Ok(Budget {
        budget_id: row.try_get("budget_id")?,
        user_id: row.try_get("user_id")?,
        category_id: row.try_get("category_id")?,
        allocated_amount: decode_decimal(row, "allocated_amount")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
    })
}

pub async fn create_budget(
    pool: &Pool<Sqlite>,
    user_id: i64,
    b: &ValidBudget,
) -> Result<i64, sqlx::Error> {
    let amount_str = b.allocated_amount.to_string();

    let budget_id = sqlx::query(
        r#"
        INSERT INTO budgets (user_id, category_id, allocated_amount, start_date, end_date)
        VALUES (?, ?, ?, ?, ?)
        RETURNING budget_id
        "#,
    )
    .bind(user_id)
    .bind(b.category_id)
    .bind(amount_str)
    .bind(b.start_date)
    .bind(b.end_date)
    .fetch_one(pool)
    .await?
    .try_get("budget_id")?;

    Ok(budget_id)
}

pub async fn list_budgets(
    pool: &Pool<Sqlite>,
    user_id: i64,
    filter: &BudgetFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Budget>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT b.budget_id, b.user_id, b.category_id, b.allocated_amount, b.start_date, b.end_date \
         FROM budgets b \
         JOIN categories c ON c.category_id = b.category_id \
         WHERE b.user_id = ",
    );
    qb.push_bind(user_id);
    push_budget_filters(&mut qb, filter);
    qb.push(" ORDER BY b.budget_id ASC");
    qb.push(" LIMIT ").push_bind(limit);
    qb.push(" OFFSET ").push_bind(offset);

    qb.build()
        .fetch_all(pool)
        .await?
        .iter()
        .map(map_budget)
        .collect()
}

fn push_budget_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &BudgetFilter) {
    if let Some((start, end)) = filter.window {
        qb.push(" AND b.start_date >= ").push_bind(start);
        qb.push(" AND b.end_date <= ").push_bind(end);
    }
    if let Some(t) = filter.category_type {
        qb.push(" AND c.category_type = ").push_bind(t.as_str());
    }
}

pub async fn count_budgets(
    pool: &Pool<Sqlite>,
    user_id: i64,
    filter: &BudgetFilter,
) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT COUNT(*) FROM budgets b \
         JOIN categories c ON c.category_id = b.category_id \
         WHERE b.user_id = ",
    );
    qb.push_bind(user_id);
    push_budget_filters(&mut qb, filter);

    qb.build_query_scalar::<i64>().fetch_one(pool).await
}

pub async fn get_budget_owned(
    pool: &Pool<Sqlite>,
    user_id: i64,
    budget_id: i64,
) -> Result<Option<Budget>, sqlx::Error> {
    let row = sqlx::query("SELECT * FROM budgets WHERE budget_id = ? AND user_id = ?")
        .bind(budget_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_budget).transpose()
}

// see get_category_any
pub async fn get_budget_any(
    pool: &Pool<Sqlite>,
    budget_id: i64,
) -> Result<Option<Budget>, sqlx::Error> {
    let row = sqlx::query("SELECT * FROM budgets WHERE budget_id = ?")
        .bind(budget_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_budget).transpose()
}

pub async fn update_budget(
    pool: &Pool<Sqlite>,
    user_id: i64,
    budget_id: i64,
    b: &ValidBudget,
) -> Result<bool, sqlx::Error> {
    let amount_str = b.allocated_amount.to_string();

    let result = sqlx::query(
        r#"
        UPDATE budgets
        SET category_id = ?, allocated_amount = ?, start_date = ?, end_date = ?
        WHERE budget_id = ? AND user_id = ?
        "#,
    )
    .bind(b.category_id)
    .bind(amount_str)
    .bind(b.start_date)
    .bind(b.end_date)
    .bind(budget_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/* Deleting a budget never touches its transactions beyond clearing the link
(set-null). Done in one scoped transaction so a failure leaves both sides
consistent. */
pub async fn delete_budget(
    pool: &Pool<Sqlite>,
    user_id: i64,
    budget_id: i64,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE transactions SET budget_id = NULL WHERE budget_id = ? AND user_id = ?")
        .bind(budget_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM budgets WHERE budget_id = ? AND user_id = ?")
        .bind(budget_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/*==========Savings goal queries===========*/

fn map_savings_goal(row: &SqliteRow) -> Result<SavingsGoal, sqlx::Error> {
    Ok(SavingsGoal {
        goal_id: row.try_get("goal_id")?,
        user_id: row.try_get("user_id")?,
        goal_name: row.try_get("goal_name")?,
        target_amount: decode_decimal(row, "target_amount")?,
        current_amount: decode_decimal(row, "current_amount")?,
        deadline: row.try_get("deadline")?,
    })
}

pub async fn create_savings_goal(
    pool: &Pool<Sqlite>,
    user_id: i64,
    g: &ValidSavingsGoal,
) -> Result<i64, sqlx::Error> {
    let target_str = g.target_amount.to_string();
    let current_str = g.current_amount.to_string();

    let goal_id = sqlx::query(
        r#"
        INSERT INTO savings_goals (user_id, goal_name, target_amount, current_amount, deadline)
        VALUES (?, ?, ?, ?, ?)
        RETURNING goal_id
        "#,
    )
    .bind(user_id)
    .bind(&g.goal_name)
    .bind(target_str)
    .bind(current_str)
    .bind(g.deadline)
    .fetch_one(pool)
    .await?
    .try_get("goal_id")?;

    Ok(goal_id)
}

pub async fn list_savings_goals(
    pool: &Pool<Sqlite>,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<SavingsGoal>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT * FROM savings_goals
        WHERE user_id = ?
        ORDER BY goal_id ASC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?
    .iter()
    .map(map_savings_goal)
    .collect()
}

pub async fn count_savings_goals(pool: &Pool<Sqlite>, user_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM savings_goals WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

// unpaginated; net worth sums every goal the user has
pub async fn get_all_savings_goals(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<SavingsGoal>, sqlx::Error> {
    sqlx::query("SELECT * FROM savings_goals WHERE user_id = ? ORDER BY goal_id ASC")
        .bind(user_id)
        .fetch_all(pool)
        .await?
        .iter()
        .map(map_savings_goal)
        .collect()
}

pub async fn get_savings_goal_owned(
    pool: &Pool<Sqlite>,
    user_id: i64,
    goal_id: i64,
) -> Result<Option<SavingsGoal>, sqlx::Error> {
    let row = sqlx::query("SELECT * FROM savings_goals WHERE goal_id = ? AND user_id = ?")
        .bind(goal_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_savings_goal).transpose()
}

pub async fn update_savings_goal(
    pool: &Pool<Sqlite>,
    user_id: i64,
    goal_id: i64,
    g: &ValidSavingsGoal,
) -> Result<bool, sqlx::Error> {
    let target_str = g.target_amount.to_string();
    let current_str = g.current_amount.to_string();

    let result = sqlx::query(
        r#"
        UPDATE savings_goals
        SET goal_name = ?, target_amount = ?, current_amount = ?, deadline = ?
        WHERE goal_id = ? AND user_id = ?
        "#,
    )
    .bind(&g.goal_name)
    .bind(target_str)
    .bind(current_str)
    .bind(g.deadline)
    .bind(goal_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_savings_goal(
    pool: &Pool<Sqlite>,
    user_id: i64,
    goal_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM savings_goals WHERE goal_id = ? AND user_id = ?")
        .bind(goal_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Report queries===========*/

// transactions joined with their category's type, for the aggregation layer
pub async fn fetch_report_entries(
    pool: &Pool<Sqlite>,
    user_id: i64,
    filter: &TransactionFilter,
) -> Result<Vec<ReportEntry>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT t.amount, t.date, c.category_type \
         FROM transactions t \
         JOIN categories c ON c.category_id = t.category_id \
         WHERE t.user_id = ",
    );
    qb.push_bind(user_id);
    push_transaction_filters(&mut qb, filter);

    qb.build()
        .fetch_all(pool)
        .await?
        .iter()
        .map(|row| {
            Ok(ReportEntry {
                category_type: row.try_get("category_type")?,
                amount: decode_decimal(row, "amount")?,
                date: row.try_get("date")?,
            })
        })
        .collect()
}

pub async fn budgets_with_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<BudgetStatus>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT b.budget_id, c.category_name, b.allocated_amount
        FROM budgets b
        JOIN categories c ON c.category_id = b.category_id
        WHERE b.user_id = ?
        ORDER BY b.budget_id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|row| {
        Ok(BudgetStatus {
            budget_id: row.try_get("budget_id")?,
            category_name: row.try_get("category_name")?,
            allocated_amount: decode_decimal(row, "allocated_amount")?,
        })
    })
    .collect()
}

// (budget_id, amount) for every transaction explicitly linked to a budget
pub async fn transactions_linked_to_budgets(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<(i64, Decimal)>, sqlx::Error> {
    sqlx::query(
        "SELECT budget_id, amount FROM transactions WHERE user_id = ? AND budget_id IS NOT NULL",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|row| Ok((row.try_get("budget_id")?, decode_decimal(row, "amount")?)))
    .collect()
}

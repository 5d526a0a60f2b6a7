pub mod user;
pub mod auth_token;
pub mod category;
pub mod transaction;
pub mod budget;
pub mod savings_goal;

pub use user::User;
pub use auth_token::AuthToken;
pub use category::{Category, CategoryType};
pub use transaction::Transaction;
pub use budget::Budget;
pub use savings_goal::SavingsGoal;

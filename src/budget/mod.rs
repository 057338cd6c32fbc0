pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{create_budget, delete_budget, get_budget, list_budgets, update_budget};

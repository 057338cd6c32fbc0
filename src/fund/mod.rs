pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{create_fund, delete_fund, get_fund, list_funds, update_fund};

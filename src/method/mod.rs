pub mod handlers;
pub mod models;

pub use handlers::list_methods;
pub use models::PaymentMethod;

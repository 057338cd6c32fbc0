use actix_web::{get, web, HttpResponse, Responder};
use sqlx::SqlitePool;

use crate::errors::{json_error_handler, query_error_handler};
use crate::{budget, category, fund, method, transaction};

/// Health check endpoint that verifies database connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable")
    )
)]
#[get("/health")]
pub async fn health_check(pool: web::Data<SqlitePool>) -> impl Responder {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(_) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "database": "disconnected"
        })),
    }
}

/// Register every `/api` endpoint. Specific routes come before the generic
/// `{key}` ones they would otherwise be shadowed by.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // Methods
        .service(method::list_methods)
        // Funds
        .service(fund::list_funds)
        .service(fund::create_fund)
        .service(fund::get_fund)
        .service(fund::update_fund)
        .service(fund::delete_fund)
        // Categories
        .service(category::list_categories)
        .service(category::create_category)
        .service(category::get_categories_by_type)
        .service(category::get_category)
        .service(category::update_category)
        .service(category::delete_category)
        // Transactions
        .service(transaction::list_transactions)
        .service(transaction::create_transaction)
        .service(transaction::get_transaction)
        .service(transaction::update_transaction)
        .service(transaction::delete_transaction)
        // Budgets
        .service(budget::list_budgets)
        .service(budget::create_budget)
        .service(budget::get_budget)
        .service(budget::update_budget)
        .service(budget::delete_budget);
}

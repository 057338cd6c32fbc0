use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::budget::models::{BudgetResponse, BudgetStatus, CreateBudgetDto, UpdateBudgetDto};
use crate::category::models::{
    CategoryResponse, CategoryType, CreateCategoryDto, UpdateCategoryDto,
};
use crate::errors::ErrorResponse;
use crate::fund::models::{CreateFundDto, FundResponse, UpdateFundDto};
use crate::models::MessageResponse;
use crate::pagination::PageMeta;
use crate::transaction::models::{
    CreateTransactionDto, TransactionResponse, TransactionType, UpdateTransactionDto,
};

/// Security scheme modifier for the static bearer key
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Static API key"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PeFi API",
        version = "0.1.0",
        description = "CRUD API for personal finance transactions, budgets, categories and funds"
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Methods", description = "Fixed payment methods"),
        (name = "Funds", description = "Named pools of money"),
        (name = "Categories", description = "Income and expense categories"),
        (name = "Transactions", description = "Income, expense and transfer records"),
        (name = "Budgets", description = "Spending budgets over a date range")
    ),
    paths(
        crate::routes::health_check,
        crate::method::handlers::list_methods,
        crate::fund::handlers::list_funds,
        crate::fund::handlers::get_fund,
        crate::fund::handlers::create_fund,
        crate::fund::handlers::update_fund,
        crate::fund::handlers::delete_fund,
        crate::category::handlers::list_categories,
        crate::category::handlers::get_categories_by_type,
        crate::category::handlers::get_category,
        crate::category::handlers::create_category,
        crate::category::handlers::update_category,
        crate::category::handlers::delete_category,
        crate::transaction::handlers::list_transactions,
        crate::transaction::handlers::get_transaction,
        crate::transaction::handlers::create_transaction,
        crate::transaction::handlers::update_transaction,
        crate::transaction::handlers::delete_transaction,
        crate::budget::handlers::list_budgets,
        crate::budget::handlers::get_budget,
        crate::budget::handlers::create_budget,
        crate::budget::handlers::update_budget,
        crate::budget::handlers::delete_budget,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            PageMeta,
            FundResponse,
            CreateFundDto,
            UpdateFundDto,
            CategoryType,
            CategoryResponse,
            CreateCategoryDto,
            UpdateCategoryDto,
            TransactionType,
            TransactionResponse,
            CreateTransactionDto,
            UpdateTransactionDto,
            BudgetStatus,
            BudgetResponse,
            CreateBudgetDto,
            UpdateBudgetDto,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

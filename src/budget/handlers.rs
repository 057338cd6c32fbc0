use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::ApiKeyAuth;
use crate::models::MessageResponse;
use crate::pagination::{PageQuery, Paginated, Pagination};

use super::models::{BudgetIdPath, BudgetResponse, CreateBudgetDto, UpdateBudgetDto};
use super::service::BudgetService;

/// GET /api/budgets - List budgets, latest start date first
#[utoipa::path(
    get,
    path = "/api/budgets",
    tag = "Budgets",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of budgets", body = Paginated<BudgetResponse>),
        (status = 400, description = "Invalid page or pageSize", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/budgets")]
pub async fn list_budgets(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let pagination = Pagination::try_from(&*query)?;
    let page = BudgetService::get_all(pool.get_ref(), &pagination).await?;

    Ok(HttpResponse::Ok().json(page.map(BudgetResponse::from)))
}

/// GET /api/budgets/{id} - Get a specific budget by ID
#[utoipa::path(
    get,
    path = "/api/budgets/{id}",
    tag = "Budgets",
    params(BudgetIdPath),
    responses(
        (status = 200, description = "Budget details", body = BudgetResponse),
        (status = 404, description = "Budget not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/budgets/{id}")]
pub async fn get_budget(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<BudgetIdPath>,
) -> Result<HttpResponse, AppError> {
    let budget = BudgetService::get_by_id(pool.get_ref(), &path.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Budget not found".to_string()))?;

    Ok(HttpResponse::Ok().json(BudgetResponse::from(budget)))
}

/// POST /api/budgets - Create a new budget
#[utoipa::path(
    post,
    path = "/api/budgets",
    tag = "Budgets",
    request_body = CreateBudgetDto,
    responses(
        (status = 201, description = "Budget created", body = BudgetResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/budgets")]
pub async fn create_budget(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    body: web::Json<CreateBudgetDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    body.validate_dates().map_err(|_| {
        AppError::ValidationError("end_date must not be before start_date".to_string())
    })?;

    let budget = BudgetService::create(pool.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Created().json(BudgetResponse::from(budget)))
}

/// PUT /api/budgets/{id} - Partially update a budget
#[utoipa::path(
    put,
    path = "/api/budgets/{id}",
    tag = "Budgets",
    params(BudgetIdPath),
    request_body = UpdateBudgetDto,
    responses(
        (status = 200, description = "Budget updated", body = BudgetResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Budget not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/api/budgets/{id}")]
pub async fn update_budget(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<BudgetIdPath>,
    body: web::Json<UpdateBudgetDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let budget = BudgetService::update(pool.get_ref(), &path.id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(BudgetResponse::from(budget)))
}

/// DELETE /api/budgets/{id} - Delete a budget
#[utoipa::path(
    delete,
    path = "/api/budgets/{id}",
    tag = "Budgets",
    params(BudgetIdPath),
    responses(
        (status = 200, description = "Budget deleted", body = MessageResponse),
        (status = 404, description = "Budget not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/api/budgets/{id}")]
pub async fn delete_budget(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<BudgetIdPath>,
) -> Result<HttpResponse, AppError> {
    BudgetService::delete(pool.get_ref(), &path.id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::deleted("Budget")))
}

use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::ApiKeyAuth;
use crate::models::MessageResponse;
use crate::pagination::{PageQuery, Paginated, Pagination};

use super::models::{CreateFundDto, FundNamePath, FundResponse, UpdateFundDto};
use super::service::FundService;

/// GET /api/funds - List funds, name ascending
#[utoipa::path(
    get,
    path = "/api/funds",
    tag = "Funds",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of funds", body = Paginated<FundResponse>),
        (status = 400, description = "Invalid page or pageSize", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/funds")]
pub async fn list_funds(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let pagination = Pagination::try_from(&*query)?;
    let page = FundService::get_all(pool.get_ref(), &pagination).await?;

    Ok(HttpResponse::Ok().json(page.map(FundResponse::from)))
}

/// GET /api/funds/{name} - Get a fund by name
#[utoipa::path(
    get,
    path = "/api/funds/{name}",
    tag = "Funds",
    params(FundNamePath),
    responses(
        (status = 200, description = "Fund details", body = FundResponse),
        (status = 404, description = "Fund not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/funds/{name}")]
pub async fn get_fund(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<FundNamePath>,
) -> Result<HttpResponse, AppError> {
    let fund = FundService::get_by_name(pool.get_ref(), &path.name)
        .await?
        .ok_or_else(|| AppError::NotFound("Fund not found".to_string()))?;

    Ok(HttpResponse::Ok().json(FundResponse::from(fund)))
}

/// POST /api/funds - Create a fund
#[utoipa::path(
    post,
    path = "/api/funds",
    tag = "Funds",
    request_body = CreateFundDto,
    responses(
        (status = 201, description = "Fund created", body = FundResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Fund already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/funds")]
pub async fn create_fund(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    body: web::Json<CreateFundDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let fund = FundService::create(pool.get_ref(), &body).await?;

    Ok(HttpResponse::Created().json(FundResponse::from(fund)))
}

/// PUT /api/funds/{name} - Partially update or rename a fund
#[utoipa::path(
    put,
    path = "/api/funds/{name}",
    tag = "Funds",
    params(FundNamePath),
    request_body = UpdateFundDto,
    responses(
        (status = 200, description = "Fund updated", body = FundResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Fund not found", body = ErrorResponse),
        (status = 409, description = "New name already taken", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/api/funds/{name}")]
pub async fn update_fund(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<FundNamePath>,
    body: web::Json<UpdateFundDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let fund = FundService::update(pool.get_ref(), &path.name, &body).await?;

    Ok(HttpResponse::Ok().json(FundResponse::from(fund)))
}

/// DELETE /api/funds/{name} - Delete a fund
#[utoipa::path(
    delete,
    path = "/api/funds/{name}",
    tag = "Funds",
    params(FundNamePath),
    responses(
        (status = 200, description = "Fund deleted", body = MessageResponse),
        (status = 404, description = "Fund not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/api/funds/{name}")]
pub async fn delete_fund(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<FundNamePath>,
) -> Result<HttpResponse, AppError> {
    FundService::delete(pool.get_ref(), &path.name).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::deleted("Fund")))
}
